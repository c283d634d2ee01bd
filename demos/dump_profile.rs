//! Prints the built-in BASIS profile as JSON, or validates a profile file
//!
//! ```text
//! cargo run --example dump_profile
//! cargo run --example dump_profile -- path/to/profile.json
//! ```

use basis_lexprofile::basis::BASIS;
use basis_lexprofile::{ProfileError, codec};

fn main() -> Result<(), ProfileError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let profile = codec::from_path(&path)?;
            println!("{} is a valid profile for {}", path, profile.name());
            for group in profile.keyword_groups() {
                println!(
                    "  group {} ({}): {} keywords, case-sensitive: {}",
                    group.id(),
                    group.label(),
                    group.len(),
                    group.is_case_sensitive()
                );
            }
        }
        None => codec::to_writer(std::io::stdout().lock(), &BASIS)?,
    }
    Ok(())
}
