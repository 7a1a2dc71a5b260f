//! Build script for pathshift-preload
//!
//! Compiles the C variadic entry points (open-family mode extraction and
//! execl-family list reconstruction). The C compiler generates correct
//! va_list ABI code, which stable Rust cannot do for definitions.

fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "linux" {
        println!("cargo:rerun-if-changed=src/c/varargs.c");

        cc::Build::new()
            .file("src/c/varargs.c")
            .opt_level(3)
            .compile("pathshift_varargs");
    }
}
