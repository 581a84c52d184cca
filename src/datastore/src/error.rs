// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors detected by the client library before a request is sent.
//!
//! These errors are returned wrapped in a [crate::Error], use
//! [crate::Error::is_binding] to detect them and [std::error::Error::source]
//! to access the details.

/// A key, entity, or query cannot be used in the requested operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum KeyError {
    /// The operation requires a complete key, i.e., a key where the last path
    /// element has an id or a name.
    #[error("the key {0:?} is incomplete, the last path element needs an id or a name")]
    Incomplete(crate::model::Key),

    /// The key has no path elements.
    #[error("the key has an empty path")]
    EmptyPath,

    /// The entity has no key.
    #[error("the entity has no key")]
    MissingKey,

    /// The service returned fewer mutation results than mutations sent.
    #[error("expected {expected} mutation results, got {got}")]
    MismatchedResults { expected: usize, got: usize },
}

impl KeyError {
    pub(crate) fn into_binding(self) -> crate::Error {
        crate::Error::binding(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Key;
    use crate::model::PathElement;
    use std::error::Error as _;

    #[test]
    fn into_binding() {
        let key = Key::from_path([PathElement::incomplete("Task")]);
        let err = KeyError::Incomplete(key.clone()).into_binding();
        assert!(err.is_binding(), "{err:?}");
        let source = err
            .source()
            .and_then(|e| e.downcast_ref::<KeyError>())
            .cloned();
        assert_eq!(source, Some(KeyError::Incomplete(key)));
    }

    #[test]
    fn display() {
        let got = KeyError::MismatchedResults {
            expected: 2,
            got: 1,
        }
        .to_string();
        assert!(got.contains("expected 2"), "{got}");
    }
}
