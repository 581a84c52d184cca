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

use anyhow::Result;

const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";
const DOCUMENTAI_LOCATION_VAR: &str = "GOOGLE_CLOUD_RUST_TEST_DOCUMENTAI_LOCATION";
const DOCUMENTAI_PROCESSOR_VAR: &str = "GOOGLE_CLOUD_RUST_TEST_DOCUMENTAI_PROCESSOR";
const DEFAULT_DOCUMENTAI_LOCATION: &str = "us";
const DEFAULT_DOCUMENTAI_PROCESSOR: &str = "52a38e080c1a7296";

/// Returns the project id used for the integration tests.
pub fn project_id() -> Result<String> {
    std::env::var(PROJECT_VAR).map_err(anyhow::Error::from)
}

/// Returns the Document AI location used for the integration tests.
pub fn documentai_location() -> String {
    std::env::var(DOCUMENTAI_LOCATION_VAR)
        .ok()
        .unwrap_or(DEFAULT_DOCUMENTAI_LOCATION.to_string())
}

/// Returns an existing Document AI processor with pretrained versions.
pub fn documentai_processor() -> String {
    std::env::var(DOCUMENTAI_PROCESSOR_VAR)
        .ok()
        .unwrap_or(DEFAULT_DOCUMENTAI_PROCESSOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_env::ScopedEnv;
    use serial_test::serial;

    #[serial]
    #[test]
    fn project() {
        let _env = ScopedEnv::remove(PROJECT_VAR);
        let got = project_id();
        assert!(got.is_err(), "{got:?}");
        let _env = ScopedEnv::set(PROJECT_VAR, "abc");
        let got = project_id();
        assert!(got.as_ref().is_ok_and(|v| v == "abc"), "{got:?}");
    }

    #[serial]
    #[test]
    fn location() {
        let _env = ScopedEnv::remove(DOCUMENTAI_LOCATION_VAR);
        let got = documentai_location();
        assert_eq!(got, DEFAULT_DOCUMENTAI_LOCATION);
        let _env = ScopedEnv::set(DOCUMENTAI_LOCATION_VAR, "eu");
        let got = documentai_location();
        assert_eq!(got, "eu");
    }

    #[serial]
    #[test]
    fn processor() {
        let _env = ScopedEnv::remove(DOCUMENTAI_PROCESSOR_VAR);
        let got = documentai_processor();
        assert_eq!(got, DEFAULT_DOCUMENTAI_PROCESSOR);
        let _env = ScopedEnv::set(DOCUMENTAI_PROCESSOR_VAR, "abc");
        let got = documentai_processor();
        assert_eq!(got, "abc");
    }
}
