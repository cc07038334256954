fn main() {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PORTAUDIO");
    if std::env::var_os("CARGO_FEATURE_PORTAUDIO").is_none() {
        return;
    }

    println!("cargo:rustc-link-search=native=/opt/homebrew/lib");
    println!("cargo:rustc-link-lib=portaudio");
}
