use core::fmt;
use core::str::FromStr;

use super::OptNumber;

/// The registered options this crate knows by name, ordered by number.
static REGISTRY: &[(u32, &str)] = &[(1, "If-Match"),
                                    (3, "Uri-Host"),
                                    (4, "ETag"),
                                    (5, "If-None-Match"),
                                    (6, "Observe"),
                                    (7, "Uri-Port"),
                                    (8, "Location-Path"),
                                    (11, "Uri-Path"),
                                    (12, "Content-Format"),
                                    (14, "Max-Age"),
                                    (15, "Uri-Query"),
                                    (17, "Accept"),
                                    (20, "Location-Query"),
                                    (23, "Block2"),
                                    (27, "Block1"),
                                    (35, "Proxy-Uri"),
                                    (39, "Proxy-Scheme"),
                                    (60, "Size1")];

/// [`OptNumber`]s of the options registered in this crate's name table
pub mod number {
  use super::super::OptNumber;

  /// If-Match
  pub const IF_MATCH: OptNumber = OptNumber(1);
  /// Uri-Host
  pub const URI_HOST: OptNumber = OptNumber(3);
  /// ETag
  pub const ETAG: OptNumber = OptNumber(4);
  /// If-None-Match
  pub const IF_NONE_MATCH: OptNumber = OptNumber(5);
  /// Observe
  pub const OBSERVE: OptNumber = OptNumber(6);
  /// Uri-Port
  pub const URI_PORT: OptNumber = OptNumber(7);
  /// Location-Path
  pub const LOCATION_PATH: OptNumber = OptNumber(8);
  /// Uri-Path
  pub const URI_PATH: OptNumber = OptNumber(11);
  /// Content-Format
  pub const CONTENT_FORMAT: OptNumber = OptNumber(12);
  /// Max-Age
  pub const MAX_AGE: OptNumber = OptNumber(14);
  /// Uri-Query
  pub const URI_QUERY: OptNumber = OptNumber(15);
  /// Accept
  pub const ACCEPT: OptNumber = OptNumber(17);
  /// Location-Query
  pub const LOCATION_QUERY: OptNumber = OptNumber(20);
  /// Block2
  pub const BLOCK2: OptNumber = OptNumber(23);
  /// Block1
  pub const BLOCK1: OptNumber = OptNumber(27);
  /// Proxy-Uri
  pub const PROXY_URI: OptNumber = OptNumber(35);
  /// Proxy-Scheme
  pub const PROXY_SCHEME: OptNumber = OptNumber(39);
  /// Size1
  pub const SIZE1: OptNumber = OptNumber(60);
}

impl OptNumber {
  /// The canonical name of this option, if it is one of the registered
  /// options this crate knows about.
  ///
  /// ```
  /// use coap_wire::OptNumber;
  ///
  /// assert_eq!(OptNumber(11).name(), Some("Uri-Path"));
  /// assert_eq!(OptNumber(9).name(), None);
  /// ```
  pub fn name(&self) -> Option<&'static str> {
    REGISTRY.iter()
            .find(|(number, _)| *number == self.0)
            .map(|(_, name)| *name)
  }
}

/// Formats the canonical name when the number is registered, or the
/// decimal string of the number when it is not.
///
/// ```
/// use coap_wire::OptNumber;
///
/// assert_eq!(OptNumber(12).to_string(), "Content-Format");
/// assert_eq!(OptNumber(560).to_string(), "560");
/// ```
impl fmt::Display for OptNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.name() {
      | Some(name) => f.write_str(name),
      | None => write!(f, "{}", self.0),
    }
  }
}

/// Error yielded parsing an [`OptNumber`] from a string that is neither
/// a registered option name nor a decimal integer
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct InvalidOptionName(pub String);

impl fmt::Display for InvalidOptionName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} is not a registered option name or a number", self.0)
  }
}

impl std::error::Error for InvalidOptionName {}

impl FromStr for OptNumber {
  type Err = InvalidOptionName;

  /// Accepts a canonical option name (`"Uri-Path"`, case-sensitive) or
  /// the decimal string of any option number (`"560"`).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    REGISTRY.iter()
            .find(|(_, name)| *name == s)
            .map(|(number, _)| OptNumber(*number))
            .or_else(|| s.parse::<u32>().ok().map(OptNumber))
            .ok_or_else(|| InvalidOptionName(s.into()))
  }
}
