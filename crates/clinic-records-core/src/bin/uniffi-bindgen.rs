//! Binding generator entry point (`cargo run --bin uniffi-bindgen -- generate ...`).

fn main() {
    uniffi::uniffi_bindgen_main()
}
