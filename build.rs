fn main() {
    println!("cargo:rerun-if-changed=assets/app.ico");

    #[cfg(target_os = "windows")]
    {
        // The icon is optional; release packaging drops it into assets/.
        if std::path::Path::new("assets/app.ico").exists() {
            let mut res = winres::WindowsResource::new();
            res.set_icon("assets/app.ico");
            res.compile().expect("Failed to compile Windows resources");
        }
    }
}
