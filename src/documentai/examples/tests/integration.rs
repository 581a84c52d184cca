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

#[cfg(all(test, feature = "run-integration-tests"))]
mod tests {
    use documentai_samples::*;
    use google_cloud_documentai_v1::model::processor_version::State;
    use google_cloud_test_utils::runtime_config::{
        documentai_location, documentai_processor, project_id,
    };
    use google_cloud_test_utils::tracing::enable_tracing;

    #[tokio::test]
    async fn list_processor_versions() -> anyhow::Result<()> {
        let _guard = enable_tracing();
        let (project_id, location, processor_id) =
            (project_id()?, documentai_location(), documentai_processor());
        let client = client(&location).await?;

        let versions =
            list_processor_versions::sample(&client, &project_id, &location, &processor_id)
                .await?;
        assert!(
            versions.iter().any(|v| v
                .name
                .rsplit('/')
                .next()
                .is_some_and(|id| id.starts_with("pretrained-ocr"))),
            "{versions:?}"
        );
        for name in ["Google Stable", "Google Release Candidate"] {
            assert!(
                versions.iter().any(|v| v.display_name == name),
                "missing {name} in {versions:?}"
            );
        }
        assert!(
            versions.iter().any(|v| v.state == State::Deployed),
            "{versions:?}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_processor() -> anyhow::Result<()> {
        let _guard = enable_tracing();
        let (project_id, location) = (project_id()?, documentai_location());
        let client = client(&location).await?;

        // Deleting a processor that does not exist prints the error.
        delete_processor::sample(&client, &project_id, &location, "aaaaaaaaa").await?;
        Ok(())
    }

    #[tokio::test]
    async fn undeploy_pretrained_version() -> anyhow::Result<()> {
        let _guard = enable_tracing();
        let (project_id, location, processor_id) =
            (project_id()?, documentai_location(), documentai_processor());
        let client = client(&location).await?;

        // Pretrained versions cannot be undeployed, the sample prints the error.
        undeploy_processor_version::sample(
            &client,
            &project_id,
            &location,
            &processor_id,
            "pretrained-ocr-v1.0-2020-09-23",
        )
        .await?;
        Ok(())
    }

    #[tokio::test]
    async fn deploy_pretrained_version() -> anyhow::Result<()> {
        let _guard = enable_tracing();
        let (project_id, location, processor_id) =
            (project_id()?, documentai_location(), documentai_processor());
        let client = client(&location).await?;

        deploy_processor_version::sample(
            &client,
            &project_id,
            &location,
            &processor_id,
            "pretrained-ocr-v1.0-2020-09-23",
        )
        .await?;
        Ok(())
    }
}
