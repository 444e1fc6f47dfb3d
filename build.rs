//! Retrieves information about the version of the binary from Git and the
//! build environment. The generated module is exposed as `crate::build` and
//! printed in the session banner.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
