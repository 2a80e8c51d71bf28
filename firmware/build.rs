fn main() {
    println!("cargo:rerun-if-changed=assets/sprites");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
