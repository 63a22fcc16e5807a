use super::*;

#[derive(Deserialize, Default, PartialEq, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
  #[serde(default)]
  pub chain: Chain,
}
