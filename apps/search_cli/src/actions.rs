//! Scripted UI actions accepted on the command line.

use std::str::FromStr;

use shared::domain::SortDirection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(String),
    Submit,
    Page(u32),
    /// Sort index and optional direction; `None` means the mode's default.
    Sort(usize, Option<SortDirection>),
    Official(bool),
    CopyInstall(usize),
    CopyBucket(usize),
}

fn parse_direction(raw: &str) -> Result<SortDirection, String> {
    match raw.to_ascii_lowercase().as_str() {
        "asc" | "ascending" | "0" => Ok(SortDirection::Ascending),
        "desc" | "descending" | "1" => Ok(SortDirection::Descending),
        other => Err(format!("unknown sort direction '{other}'")),
    }
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("{name} expects a non-negative integer, got '{raw}'"))
}

impl FromStr for Action {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (name, value) = match raw.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (raw, None),
        };

        match (name, value) {
            ("edit", Some(text)) => Ok(Self::Edit(text.to_string())),
            ("submit", None) => Ok(Self::Submit),
            ("page", Some(page)) => parse_number("page", page).map(Self::Page),
            ("sort", Some(spec)) => {
                let (index, direction) = match spec.split_once(':') {
                    Some((index, direction)) => (index, Some(parse_direction(direction)?)),
                    None => (spec, None),
                };
                Ok(Self::Sort(parse_number("sort", index)?, direction))
            }
            ("official", Some(flag)) => match flag {
                "true" | "yes" | "on" => Ok(Self::Official(true)),
                "false" | "no" | "off" => Ok(Self::Official(false)),
                other => Err(format!("official expects true/false, got '{other}'")),
            },
            ("official", None) => Ok(Self::Official(true)),
            ("copy", Some(index)) => parse_number("copy", index).map(Self::CopyInstall),
            ("copy-bucket", Some(index)) => parse_number("copy-bucket", index).map(Self::CopyBucket),
            _ => Err(format!(
                "unrecognized action '{raw}' (expected edit=, submit, page=, sort=, official=, copy=, copy-bucket=)"
            )),
        }
    }
}
