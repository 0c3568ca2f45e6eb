use anyhow::{bail, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "Vec<T>", into = "Vec<T>")]
pub struct NonEmptyVec<T: Clone>(Vec<T>);

impl<T: Clone> NonEmptyVec<T> {
    pub fn new(t: T) -> Self {
        Self(vec![t])
    }

    pub fn maybe_new(v: Vec<T>) -> Option<Self> {
        Self::try_from(v).ok()
    }

    pub fn push(&mut self, t: T) {
        self.0.push(t)
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Clone> TryFrom<Vec<T>> for NonEmptyVec<T> {
    type Error = Error;

    fn try_from(v: Vec<T>) -> Result<NonEmptyVec<T>, Error> {
        if v.is_empty() {
            bail!("cannot create a NonEmptyVec from an empty Vec")
        }
        Ok(NonEmptyVec(v))
    }
}

impl<T: Clone> From<NonEmptyVec<T>> for Vec<T> {
    fn from(NonEmptyVec(v): NonEmptyVec<T>) -> Vec<T> {
        v
    }
}

impl<T: Clone> AsRef<[T]> for NonEmptyVec<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T: Clone> Deref for NonEmptyVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

/// An identifier the API accepts either as a JSON string or as a JSON number.
///
/// Used for relying party callback ids, OTPs, certificate ids and
/// identification result ids. The wire representation is kept so that a
/// numeric OTP is sent back as a number and a textual one (which may carry
/// leading zeros) as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Number(u64),
    Text(String),
}

impl TextOrNumber {
    /// A fresh random identifier, suitable as a `relyingPartyCallbackId`.
    pub fn random() -> Self {
        Self::Text(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for TextOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TextOrNumber {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for TextOrNumber {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<String> for TextOrNumber {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for TextOrNumber {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn non_empty_vec_rejects_empty_input() {
        assert!(NonEmptyVec::<u8>::maybe_new(vec![]).is_none());
        assert!(serde_json::from_value::<NonEmptyVec<u8>>(json!([])).is_err());

        let v: NonEmptyVec<u8> = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(&*v, &[1, 2]);
    }

    #[test]
    fn text_or_number_keeps_wire_type() {
        assert_eq!(serde_json::to_value(TextOrNumber::from(42u32)).unwrap(), json!(42));
        assert_eq!(
            serde_json::to_value(TextOrNumber::from("042")).unwrap(),
            json!("042")
        );

        let parsed: TextOrNumber = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(parsed, TextOrNumber::Number(7));
        let parsed: TextOrNumber = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(parsed.to_string(), "abc");
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(TextOrNumber::random(), TextOrNumber::random());
    }
}
