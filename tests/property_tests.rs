mod common;

use common::is_generated_name;
use goshare::{extension_of, public_url, remote_name, strip_extension, ContentSource};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

proptest! {
    #[test]
    fn url_without_extension(
        base in "https://[a-z]{1,12}\\.com/([a-z]{1,8}/)?",
        stem in "[a-zA-Z]{1,16}",
        ext in "(\\.[a-z0-9]{1,5})?"
    ) {
        let name = format!("{}{}", stem, ext);
        prop_assert_eq!(public_url(&base, &name, false), format!("{}{}", base, stem));
    }

    #[test]
    fn url_with_extension(
        base in "https://[a-z]{1,12}\\.com/",
        stem in "[a-zA-Z]{1,16}",
        ext in "\\.[a-z0-9]{1,5}"
    ) {
        let name = format!("{}{}", stem, ext);
        prop_assert_eq!(public_url(&base, &name, true), format!("{}{}", base, name));
    }

    #[test]
    fn random_name_keeps_source_extension(
        len in 1u8..=32u8,
        seed in any::<u64>(),
        stem in "[a-zA-Z0-9_-]{1,12}",
        ext in "\\.[a-z]{1,4}"
    ) {
        let source = ContentSource::LocalFile(PathBuf::from(format!("dir/{}{}", stem, ext)));
        let name = remote_name(&source, false, len, &mut StdRng::seed_from_u64(seed));
        prop_assert!(is_generated_name(&name, len as usize, &ext), "got {}", name);
    }

    #[test]
    fn keep_name_is_base_name(
        len in 1u8..=32u8,
        file_name in "[a-zA-Z0-9_-]{1,12}\\.[a-z]{1,4}"
    ) {
        let source = ContentSource::LocalFile(PathBuf::from("/tmp/uploads").join(&file_name));
        let name = remote_name(&source, true, len, &mut StdRng::seed_from_u64(0));
        prop_assert_eq!(name, file_name);
    }

    #[test]
    fn screenshot_name_is_png(len in 1u8..=64u8, seed in any::<u64>()) {
        let name = remote_name(&ContentSource::Screenshot, false, len, &mut StdRng::seed_from_u64(seed));
        prop_assert!(is_generated_name(&name, len as usize, ".png"), "got {}", name);
    }

    #[test]
    fn strip_extension_inverts_extension(name in "[a-zA-Z0-9._-]{0,20}") {
        prop_assert_eq!(format!("{}{}", strip_extension(&name), extension_of(&name)), name);
    }
}
