use std::env;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| String::from("unknown"));
    if target_os == "windows" {
        println!("cargo:rerun-if-changed=assets/app/icon.ico");
        let mut res = winres::WindowsResource::new();

        if Path::new("assets/app/icon.ico").exists() {
            res.set_icon("assets/app/icon.ico");
        }

        let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".into());
        res.set("CompanyName", "AI Memorator");
        res.set("FileDescription", "AI model GPU memory calculator");
        res.set("ProductName", "AI Memorator");
        res.set("ProductVersion", &version);
        res.set("FileVersion", &version);
        res.set("OriginalFilename", "ai-memorator.exe");
        res.set("InternalName", "ai-memorator");
        res.set("LegalCopyright", "© 2025 AI Memorator");

        if let Err(e) = res.compile() {
            eprintln!("Failed to embed Windows resources: {e}");
        }
    }
}
