fn main() {
    // Windows resource compilation for the app icon
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        if std::path::Path::new("assets/icon_128.ico").exists() {
            res.set_icon("assets/icon_128.ico");
        }
        res.compile().unwrap();
    }
}
