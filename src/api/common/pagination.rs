//
//  iam-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for IAM API list responses
//!
//! Every list endpoint answers with the same offset-based envelope:
//!
//! ```json
//! {"count": 1, "from": 0, "total_count": 25, "items": [ ... ]}
//! ```
//!
//! Pages are requested with the `page` and `per_page` query parameters,
//! which every `ListParams` struct exposes.
//!
//! # Example
//!
//! ```rust
//! use iam_api::api::common::Page;
//!
//! let json = r#"{"count": 2, "from": 0, "total_count": 5, "items": ["a", "b"]}"#;
//! let page: Page<String> = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(page.items.len(), 2);
//! assert!(page.has_next());
//! ```

use serde::{Deserialize, Serialize};

/// One page of a list response.
///
/// # Type Parameters
///
/// - `T` - The type of items contained in the `items` array
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `count` | `u64` | Number of items in this page |
/// | `from` | `u64` | Offset of the first item in this page |
/// | `total_count` | `u64` | Number of items across all pages |
/// | `items` | `Vec<T>` | Items in the current page |
///
/// All four fields are required, so a success body of some other shape is
/// reported as an unexpected response instead of an empty page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,

    pub from: u64,

    pub total_count: u64,

    pub items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            from: 0,
            total_count: 0,
            items: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    /// Checks if items remain after this page.
    pub fn has_next(&self) -> bool {
        self.from + (self.items.len() as u64) < self.total_count
    }

    /// Offset of the first item after this page, if any.
    pub fn next_from(&self) -> Option<u64> {
        if self.has_next() {
            Some(self.from + self.items.len() as u64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page() {
        let page = Page {
            count: 2,
            from: 3,
            total_count: 5,
            items: vec![1, 2],
        };
        assert!(!page.has_next());
        assert_eq!(page.next_from(), None);
    }

    #[test]
    fn test_envelope_fields_required() {
        assert!(serde_json::from_str::<Page<u8>>("{}").is_err());
        assert!(serde_json::from_str::<Page<u8>>(r#"{"unexpected": true}"#).is_err());
        let no_items = r#"{"count": 0, "from": 0, "total_count": 0}"#;
        assert!(serde_json::from_str::<Page<u8>>(no_items).is_err());

        let empty: Page<u8> =
            serde_json::from_str(r#"{"count": 0, "from": 0, "total_count": 0, "items": []}"#)
                .unwrap();
        assert_eq!(empty, Page::default());
        assert!(!empty.has_next());
    }

    #[test]
    fn test_next_from() {
        let page = Page {
            count: 1,
            from: 0,
            total_count: 3,
            items: vec!["x"],
        };
        assert_eq!(page.next_from(), Some(1));
    }
}
