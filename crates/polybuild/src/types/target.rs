use serde::{Deserialize, Serialize};

/// The closed set of platforms a build run can produce artifacts for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuildTarget {
  Android,
  Ios,
  Webgl,
  Windows,
  Linux,
  Macos,
}

impl BuildTarget {
  pub const ALL: [BuildTarget; 6] = [
    BuildTarget::Android,
    BuildTarget::Ios,
    BuildTarget::Webgl,
    BuildTarget::Windows,
    BuildTarget::Linux,
    BuildTarget::Macos,
  ];
}

impl std::fmt::Display for BuildTarget {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let name = match self {
      BuildTarget::Android => "Android",
      BuildTarget::Ios => "iOS",
      BuildTarget::Webgl => "WebGL",
      BuildTarget::Windows => "Windows",
      BuildTarget::Linux => "Linux",
      BuildTarget::Macos => "macOS",
    };

    write!(f, "{}", name)
  }
}

impl std::str::FromStr for BuildTarget {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "android" => Ok(BuildTarget::Android),
      "ios" => Ok(BuildTarget::Ios),
      "webgl" => Ok(BuildTarget::Webgl),
      "windows" => Ok(BuildTarget::Windows),
      "linux" => Ok(BuildTarget::Linux),
      "macos" => Ok(BuildTarget::Macos),
      _ => Err(crate::Error::configuration_error(format!(
        "Unknown build target: {}",
        s
      ))),
    }
  }
}
