//! Field delimiter for triple files

use std::str::FromStr;

/// How fields are separated on a line
///
/// Fields are raw strings; there is no quoting or escaping, so a token can
/// never contain the delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Tab,
    /// Any run of whitespace
    Whitespace,
    Char(char),
}

impl Delimiter {
    /// Split one line into fields
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Tab => line.split('\t').collect(),
            Delimiter::Whitespace => line.split_whitespace().collect(),
            Delimiter::Char(c) => line.split(*c).collect(),
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    /// Accepts `tab`, `whitespace`, `comma`, `\t` or any single character
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab" | "\\t" | "\t" => Ok(Delimiter::Tab),
            "whitespace" | "space" => Ok(Delimiter::Whitespace),
            "comma" => Ok(Delimiter::Char(',')),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Delimiter::Char(c)),
                    _ => Err(format!("invalid delimiter '{}'", other)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tab_keeps_empty_fields() {
        assert_eq!(Delimiter::Tab.split("a\t\tb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_whitespace_collapses_runs() {
        assert_eq!(Delimiter::Whitespace.split(" a  r\tb "), vec!["a", "r", "b"]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("tab".parse::<Delimiter>().unwrap(), Delimiter::Tab);
        assert_eq!("\\t".parse::<Delimiter>().unwrap(), Delimiter::Tab);
        assert_eq!("comma".parse::<Delimiter>().unwrap(), Delimiter::Char(','));
        assert_eq!("|".parse::<Delimiter>().unwrap(), Delimiter::Char('|'));
        assert_eq!(
            "whitespace".parse::<Delimiter>().unwrap(),
            Delimiter::Whitespace
        );
        assert!("::".parse::<Delimiter>().is_err());
        assert!("".parse::<Delimiter>().is_err());
    }
}
