/// Expose the compilation target triple as an environment variable at build time.
///
/// `keel version` prints it next to the package version.
fn main() {
    println!(
        "cargo:rustc-env=TARGET={}",
        std::env::var("TARGET").unwrap()
    );
}
