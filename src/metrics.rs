use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Default)]
pub struct PageMetrics {
    pub page_number: usize,
    pub kind: String,
    pub command_count: usize,
    pub content_bytes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentMetrics {
    pub pages: Vec<PageMetrics>,
    pub compose_ms: f64,
    pub serialize_ms: f64,
    pub total_bytes: usize,
    /// Hex SHA-256 of the serialized PDF. Identical input yields an identical
    /// fingerprint.
    pub fingerprint_sha256: String,
}

impl DocumentMetrics {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a PageMetrics> {
        self.pages.iter().filter(move |page| page.kind == kind)
    }
}

pub(crate) fn hex_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        use std::fmt::Write;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            hex_sha256(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
