//! Digests - SHA-256 over exported bytes and over what a catalog draws
//!
//! A render fingerprint covers each flag's name, stripe colors and symbol
//! markup. Pass-through fields and entry order do not take part, so two
//! catalogs share a fingerprint exactly when they render the same hearts.

use sha2::{Digest, Sha256};

use crate::flag::FlagSpec;
use crate::markup;

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Length-prefixed so that `["ab", "c"]` and `["a", "bc"]` differ.
fn feed(hasher: &mut Sha256, field: &[u8]) {
    hasher.update((field.len() as u64).to_be_bytes());
    hasher.update(field);
}

pub fn render_fingerprint<'a>(specs: impl IntoIterator<Item = &'a FlagSpec>) -> String {
    let mut specs: Vec<_> = specs.into_iter().collect();
    specs.sort_by(|a, b| a.name.cmp(&b.name));

    let mut hasher = Sha256::new();
    for spec in specs {
        feed(&mut hasher, spec.name.as_bytes());
        hasher.update((spec.colors.len() as u64).to_be_bytes());
        for color in &spec.colors {
            feed(&mut hasher, color.as_bytes());
        }
        match spec.symbol.node() {
            Some(symbol) => feed(&mut hasher, markup::to_markup(symbol).as_bytes()),
            None => hasher.update([0u8]),
        }
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, Tag};

    fn spec(name: &str, colors: &[&str]) -> FlagSpec {
        FlagSpec::new(name, colors.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_ignores_entry_order() {
        let a = [spec("bi", &["deeppink", "blue"]), spec("ace", &["black"])];
        let b = [spec("ace", &["black"]), spec("bi", &["deeppink", "blue"])];
        assert_eq!(render_fingerprint(&a), render_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_follows_stripe_order() {
        let a = [spec("bi", &["deeppink", "blue"])];
        let b = [spec("bi", &["blue", "deeppink"])];
        assert_ne!(render_fingerprint(&a), render_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_separates_fields() {
        let a = [spec("x", &["ab", "c"])];
        let b = [spec("x", &["a", "bc"])];
        assert_ne!(render_fingerprint(&a), render_fingerprint(&b));
    }

    #[test]
    fn test_symbol_counts_but_pass_through_does_not() {
        let plain = [spec("intersex", &["gold"])];
        let noted = [spec("intersex", &["gold"]).with_extra("note", "ring")];
        let ringed = [spec("intersex", &["gold"]).with_symbol(Node::new(Tag::Circle).with_attr("r", "5"))];
        assert_eq!(render_fingerprint(&plain), render_fingerprint(&noted));
        assert_ne!(render_fingerprint(&plain), render_fingerprint(&ringed));
    }
}
