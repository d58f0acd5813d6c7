// Integration tests for the manifest YAML format

use morte_core::errors::ExErrorKind;
use morte_core::manifest::{decode_manifest, encode_manifest};
use morte_core::{Digests, Manifest};
use proptest::prelude::*;

fn digests(pairs: &[(&str, &str)]) -> Digests {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_encoded_manifest_is_one_entry_per_path() {
    // Given: a manifest with two paths, one carrying two kinds
    let mut m = Manifest::new();
    m.insert("foo/file1", digests(&[("sha256", "aa")])).unwrap();
    m.insert("bar/file2", digests(&[("sha256", "bb"), ("blake3", "cc")]))
        .unwrap();

    // When: it is encoded
    let text = encode_manifest(&m).unwrap();

    // Then: paths are top-level keys in insertion order, kinds nested below
    let foo = text.find("foo/file1:").unwrap();
    let bar = text.find("bar/file2:").unwrap();
    assert!(foo < bar);
    assert!(text.contains("  blake3: cc"));
    assert_eq!(decode_manifest(&text).unwrap(), m);
}

#[test]
fn test_numeric_looking_digest_stays_a_string() {
    let mut m = Manifest::new();
    m.insert("a", digests(&[("sha256", "1234")])).unwrap();

    let back = decode_manifest(&encode_manifest(&m).unwrap()).unwrap();

    assert_eq!(back.get("a").unwrap()["sha256"], "1234");
}

#[test]
fn test_non_string_digest_is_corrupt() {
    let err = decode_manifest("a:\n  sha256: 1234\n").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ManifestCorrupt);
}

proptest! {
    #[test]
    fn prop_encode_decode_preserves_entries(
        entries in prop::collection::btree_map(
            "[a-z]{1,8}(/[a-z0-9_.]{1,8}){0,2}",
            prop::collection::btree_map("[a-z]{3,6}[0-9]{1,3}", "[0-9a-f]{8,64}", 1..3),
            0..8,
        )
    ) {
        let mut m = Manifest::new();
        for (path, d) in &entries {
            m.insert(path.clone(), d.clone()).unwrap();
        }

        let back = decode_manifest(&encode_manifest(&m).unwrap()).unwrap();

        prop_assert_eq!(&back, &m);
        prop_assert_eq!(back.paths().collect::<Vec<_>>(), m.paths().collect::<Vec<_>>());
    }
}
