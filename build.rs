fn main() {
    // Station credentials and the optional JSON overlay are baked in at
    // compile time through `option_env!` in `src/config.rs`.
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=REDDUST_CONFIG");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
