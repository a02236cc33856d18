// Forwards MDPREVIEW_CONFIG (from the environment or a .env file) to the
// compiler so src/config.rs can pick it up with option_env!.
fn main() {
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-env-changed=MDPREVIEW_CONFIG");

    let _ = dotenvy::dotenv();
    if let Ok(config) = std::env::var("MDPREVIEW_CONFIG") {
        // rustc-env values are single-line.
        let config = config.replace(['\n', '\r'], " ");
        println!("cargo:rustc-env=MDPREVIEW_CONFIG={}", config);
    }
}
