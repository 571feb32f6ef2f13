fn main() {
    // Exposed through /api/health
    let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo:rustc-env=BUILD_TIME={stamp}");
    println!("cargo:rerun-if-changed=build.rs");
}
