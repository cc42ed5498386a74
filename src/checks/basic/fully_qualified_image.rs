//! Fully qualified image check.
//!
//! Flags containers whose image reference relies on registry, repository or
//! tag defaults, and containers whose image reference does not parse.

use super::GROUP;
use super::reference::ImageReference;
use crate::checks::{CheckError, Kind, LegacyCheck, LegacyFinding, LegacyReport};
use crate::cluster::Objects;
use k8s_openapi::api::core::v1::{Container, Pod};

pub struct FullyQualifiedImageCheck;

impl LegacyCheck for FullyQualifiedImageCheck {
    fn name(&self) -> &str {
        "fully-qualified-image"
    }

    fn groups(&self) -> &[&str] {
        &[GROUP]
    }

    fn description(&self) -> &str {
        "Checks if containers have fully qualified image names"
    }

    fn run(&self, objects: &Objects) -> Result<LegacyReport, CheckError> {
        let mut report = LegacyReport::default();
        for pod in &objects.pods {
            let Some(spec) = &pod.spec else { continue };
            report.extend(check_images(pod, &spec.containers));
            if let Some(init) = &spec.init_containers {
                report.extend(check_images(pod, init));
            }
        }
        Ok(report)
    }
}

fn check_images(pod: &Pod, containers: &[Container]) -> LegacyReport {
    let mut report = LegacyReport::default();
    for container in containers {
        let image = container.image.as_deref().unwrap_or_default();
        match ImageReference::parse(image) {
            Err(err) => report.errors.push(LegacyFinding::for_object(
                format!(
                    "Malformed image name '{}' for container '{}': {}",
                    image, container.name, err
                ),
                Kind::Pod,
                &pod.metadata,
            )),
            Ok(reference) => {
                let canonical = reference.canonical();
                if canonical != image {
                    report.warnings.push(LegacyFinding::for_object(
                        format!(
                            "Use fully qualified image '{}' for container '{}'",
                            canonical, container.name
                        ),
                        Kind::Pod,
                        &pod.metadata,
                    ));
                }
            }
        }
    }
    report
}
