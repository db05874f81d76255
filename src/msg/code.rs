use core::fmt;
use core::str::FromStr;

/// # Message Code
///
/// Identifies a message as a request (class 0, detail = method),
/// a response (class 2/4/5), or the empty message (`0.00`).
///
/// The canonical human form is the dotted string `"C.DD"` with the
/// detail zero-padded to two digits, e.g. `"0.01"` (GET), `"2.05"`
/// (Content), `"4.04"` (Not Found).
///
/// ```
/// use coap_wire::Code;
///
/// assert_eq!("GET".parse::<Code>().unwrap(), Code::new(0, 1));
/// assert_eq!("2.05".parse::<Code>().unwrap(), Code::new(2, 5));
/// assert_eq!("404".parse::<Code>().unwrap(), Code::new(4, 4));
/// assert_eq!(Code::new(2, 5).to_string(), "2.05");
/// ```
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Code {
  /// The "class" of the code:
  ///
  /// |class|meaning|
  /// |---|---|
  /// |`0`|Message is a request (or empty)|
  /// |`2`|Message is a success response|
  /// |`4`|Message is a client error response|
  /// |`5`|Message is a server error response|
  pub class: u8,

  /// 2-digit integer (range `[0, 32)`) carrying the method or the
  /// granular response status
  pub detail: u8,
}

impl Code {
  /// The empty-message sentinel `0.00`, used for bare acknowledgements
  /// and resets
  pub const EMPTY: Code = Code::new(0, 0);

  /// Create a new Code
  ///
  /// ```
  /// use coap_wire::Code;
  ///
  /// let content = Code::new(2, 5);
  /// ```
  pub const fn new(class: u8, detail: u8) -> Self {
    Self { class, detail }
  }

  /// Whether this code is the empty-message sentinel `0.00`.
  ///
  /// Empty messages carry no token, options or payload, and their
  /// encoded form is exactly 4 bytes long.
  pub fn is_empty(&self) -> bool {
    *self == Self::EMPTY
  }

  /// Get the human string representation of this code as a `char`
  /// array, avoiding heap allocation.
  ///
  /// ```
  /// use coap_wire::Code;
  ///
  /// let code = Code::new(2, 5);
  /// assert_eq!(String::from_iter(code.to_human()), "2.05");
  /// ```
  pub fn to_human(&self) -> [char; 4] {
    let to_char = |d: u8| char::from_digit(d.into(), 10).unwrap_or('?');
    [to_char(self.class),
     '.',
     to_char(self.detail / 10),
     to_char(self.detail % 10)]
  }

  fn from_method(s: &str) -> Option<Code> {
    let detail = match s.to_ascii_lowercase().as_str() {
      | "get" => 1,
      | "post" => 2,
      | "put" => 3,
      | "delete" => 4,
      | "fetch" => 5,
      | "patch" => 6,
      | "ipatch" => 7,
      | _ => return None,
    };

    Some(Code::new(0, detail))
  }
}

impl Default for Code {
  fn default() -> Self {
    // 0.01, i.e. a GET request
    Code::new(0, 1)
  }
}

impl From<u8> for Code {
  fn from(b: u8) -> Self {
    let class = b >> 5;
    let detail = b & 0b11111;

    Code { class, detail }
  }
}

impl From<Code> for u8 {
  fn from(code: Code) -> u8 {
    let class = code.class << 5;
    let detail = code.detail;

    class | detail
  }
}

impl fmt::Display for Code {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.to_human().iter().try_for_each(|c| write!(f, "{}", c))
  }
}

/// Error yielded parsing a [`Code`] from a string that is not a known
/// method mnemonic, a dotted `"C.DD"` string, or a 3-digit HTTP-style
/// number
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct InvalidCode(pub String);

impl fmt::Display for InvalidCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} is not a known method or a \"class.detail\" code", self.0)
  }
}

impl std::error::Error for InvalidCode {}

impl FromStr for Code {
  type Err = InvalidCode;

  /// Resolution order:
  ///  1. case-insensitive method mnemonic (`"GET"`, `"iPATCH"`, ...)
  ///  2. dotted string, `class '.' detail` (`"2.05"`)
  ///  3. HTTP-style 3-digit number: class is `n / 100`, detail `n % 100`
  ///     (`"404"` means `4.04`)
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if let Some(code) = Self::from_method(s) {
      return Ok(code);
    }

    if let Some((class, detail)) = s.split_once('.') {
      return match (class.parse::<u8>(), detail.parse::<u8>()) {
        | (Ok(class @ 0..=7), Ok(detail @ 0..=31)) => Ok(Code::new(class, detail)),
        | _ => Err(InvalidCode(s.into())),
      };
    }

    match s.parse::<u16>() {
      | Ok(n) if n / 100 <= 7 && n % 100 <= 31 => {
        Ok(Code::new((n / 100) as u8, (n % 100) as u8))
      },
      | _ => Err(InvalidCode(s.into())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_eqb;

  #[test]
  fn parse_code_byte() {
    let byte = 0b_01_000101u8;
    let code = Code::from(byte);
    assert_eq!(code, Code::new(2, 5));
  }

  #[test]
  fn serialize_code() {
    let code = Code::new(2, 5);
    let actual: u8 = code.into();
    assert_eqb!(actual, 0b_010_00101u8);
  }

  #[test]
  fn method_mnemonics() {
    for (s, detail) in [("GET", 1),
                        ("get", 1),
                        ("POST", 2),
                        ("PUT", 3),
                        ("delete", 4),
                        ("FETCH", 5),
                        ("patch", 6),
                        ("iPATCH", 7),
                        ("IPATCH", 7)]
    {
      assert_eq!(s.parse::<Code>(), Ok(Code::new(0, detail)), "mnemonic {}", s);
    }

    assert_eq!(u8::from("get".parse::<Code>().unwrap()), 1);
  }

  #[test]
  fn dotted_strings() {
    assert_eq!("2.05".parse::<Code>(), Ok(Code::new(2, 5)));
    assert_eq!("0.00".parse::<Code>(), Ok(Code::EMPTY));
    assert_eq!(u8::from("2.05".parse::<Code>().unwrap()), 0x45);

    assert!("8.05".parse::<Code>().is_err());
    assert!("2.32".parse::<Code>().is_err());
    assert!("2.".parse::<Code>().is_err());
  }

  #[test]
  fn http_style_numbers() {
    assert_eq!("404".parse::<Code>(), Ok(Code::new(4, 4)));
    assert_eq!("500".parse::<Code>(), Ok(Code::new(5, 0)));
    assert_eq!(u8::from("404".parse::<Code>().unwrap()), 0x84);

    assert!("844".parse::<Code>().is_err());
    assert!("299".parse::<Code>().is_err());
    assert!("lock".parse::<Code>().is_err());
  }

  #[test]
  fn display_zero_pads_detail() {
    assert_eq!(Code::new(2, 5).to_string(), "2.05");
    assert_eq!(Code::new(4, 15).to_string(), "4.15");
    assert_eq!(Code::new(5, 0).to_string(), "5.00");
    assert_eq!(Code::EMPTY.to_string(), "0.00");
  }

  #[test]
  fn display_round_trips_through_from_str() {
    for byte in [0x01u8, 0x45, 0x84, 0xa0] {
      let code = Code::from(byte);
      assert_eq!(code.to_string().parse::<Code>(), Ok(code));
    }
  }
}
