use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The experimental scenario a benchmark CSV captures. Decoded from the
/// third-to-last `_` token of the file name and governs how the `Step`
/// column is interpreted.
#[derive(Debug, Display, EnumString, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestPhase {
    #[strum(serialize = "idle")]
    Idle,

    #[strum(serialize = "deployment")]
    Deployment,

    #[strum(serialize = "pod")]
    Pod,

    #[strum(serialize = "deployment-pods")]
    DeploymentPods,

    #[strum(serialize = "deployment-containers")]
    DeploymentContainers,

    #[strum(serialize = "rate-limiters")]
    RateLimiters,
}

impl TestPhase {
    pub const fn x_label(&self) -> Option<&'static str> {
        match self {
            Self::Deployment | Self::DeploymentPods | Self::DeploymentContainers => {
                Some("Number of Deployments")
            },
            Self::Pod => Some("Number of Pods"),
            Self::Idle => Some("Idle after 20 minutes"),
            Self::RateLimiters => None,
        }
    }

    /// Noun spliced into the metric's chart title. Idle and rate-limiter
    /// charts carry fixed titles instead.
    pub const fn title_noun(&self) -> Option<&'static str> {
        match self {
            Self::Deployment => Some("Deployments"),
            Self::Pod => Some("Pods"),
            Self::DeploymentPods => Some("Deployments and Pods"),
            Self::DeploymentContainers => Some("Deployments and Containers"),
            Self::Idle | Self::RateLimiters => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use claim::*;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_phase_from_token() {
        assert_eq!(assert_ok!("idle".parse::<TestPhase>()), TestPhase::Idle);
        assert_eq!(assert_ok!("deployment".parse::<TestPhase>()), TestPhase::Deployment);
        assert_eq!(assert_ok!("pod".parse::<TestPhase>()), TestPhase::Pod);
        assert_eq!(assert_ok!("deployment-pods".parse::<TestPhase>()), TestPhase::DeploymentPods);
        assert_eq!(
            assert_ok!("deployment-containers".parse::<TestPhase>()),
            TestPhase::DeploymentContainers
        );
        assert_eq!(assert_ok!("rate-limiters".parse::<TestPhase>()), TestPhase::RateLimiters);
        assert_err!("deployments".parse::<TestPhase>());
        assert_err!("rate-limiter".parse::<TestPhase>());
    }

    #[test]
    fn test_phase_axis_text() {
        assert_eq!(TestPhase::Deployment.x_label(), Some("Number of Deployments"));
        assert_eq!(TestPhase::Pod.x_label(), Some("Number of Pods"));
        assert_eq!(TestPhase::DeploymentContainers.x_label(), Some("Number of Deployments"));
        assert_eq!(TestPhase::Idle.x_label(), Some("Idle after 20 minutes"));
        assert_eq!(TestPhase::RateLimiters.x_label(), None);

        assert_eq!(TestPhase::DeploymentPods.title_noun(), Some("Deployments and Pods"));
        assert_eq!(TestPhase::Idle.title_noun(), None);
    }
}
