//! getopt-style option scanner.
//!
//! [`scan`] reads one batch of recognized options from the front of an
//! argument list and returns them together with the unconsumed tail. A batch
//! ends at the first non-option token, after `--`, after the driver-selection
//! option, or before an option the grammar does not know. Long options are
//! matched by exact name and reported by their short key, so callers apply
//! both forms the same way.

use crate::error::Error::{MissingOperand, UnexpectedOperand, UnrecognizedOption};
use crate::error::Result;
use crate::grammar::{OptionGrammar, Target};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedOption {
    pub key: char,
    pub target: Target,
    pub operand: Option<String>,
    /// The option as the user spelled it, without its operand.
    pub spelling: String,
}

impl ScannedOption {
    /// Recognizing this option ends the current batch.
    #[must_use]
    pub fn ends_batch(&self) -> bool {
        self.target == Target::DriverSelect
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<'a> {
    pub options: Vec<ScannedOption>,
    pub remaining: &'a [String],
}

/// Scans the next batch of options.
///
/// # Errors
///
/// Returns [`UnrecognizedOption`] when the batch would start with an unknown
/// option, or when an unknown letter follows a known one in a short cluster.
/// Returns [`MissingOperand`] or [`UnexpectedOperand`] when an operand is
/// absent or given to a flag.
pub fn scan<'a>(argv: &'a [String], grammar: &OptionGrammar) -> Result<Scan<'a>> {
    let mut options = Vec::new();
    let mut index = 0;

    while index < argv.len() {
        let token = argv[index].as_str();
        let rest = &argv[index + 1..];

        if token == "--" {
            index += 1;
            break;
        }

        let consumed = if let Some(long) = token.strip_prefix("--") {
            scan_long(long, rest, grammar, &mut options)?
        } else if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
            scan_cluster(cluster, rest, grammar, &mut options)?
        } else {
            break;
        };

        let Some(consumed) = consumed else {
            if options.is_empty() {
                return Err(UnrecognizedOption(token.to_string()));
            }
            break;
        };

        index += consumed;

        if options.last().is_some_and(ScannedOption::ends_batch) {
            break;
        }
    }

    Ok(Scan {
        options,
        remaining: &argv[index..],
    })
}

/// Returns the number of argv tokens consumed, or `None` if the option is unknown.
fn scan_long(
    body: &str,
    rest: &[String],
    grammar: &OptionGrammar,
    options: &mut Vec<ScannedOption>,
) -> Result<Option<usize>> {
    let (name, attached) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let Some(spec) = grammar.lookup_long(name) else {
        return Ok(None);
    };

    let spelling = format!("--{name}");

    let (operand, consumed) = match (spec.takes_value, attached) {
        (true, Some(value)) => (Some(value.to_string()), 1),
        (true, None) => match rest.first() {
            Some(next) => (Some(next.clone()), 2),
            None => return Err(MissingOperand(spelling)),
        },
        (false, Some(_)) => return Err(UnexpectedOperand(spelling)),
        (false, None) => (None, 1),
    };

    options.push(ScannedOption {
        key: spec.key,
        target: spec.target.clone(),
        operand,
        spelling,
    });

    Ok(Some(consumed))
}

/// Returns the number of argv tokens consumed, or `None` if the first letter is unknown.
fn scan_cluster(
    cluster: &str,
    rest: &[String],
    grammar: &OptionGrammar,
    options: &mut Vec<ScannedOption>,
) -> Result<Option<usize>> {
    for (position, key) in cluster.char_indices() {
        let spelling = format!("-{key}");

        let Some(spec) = grammar.lookup_short(key) else {
            if position == 0 {
                return Ok(None);
            }
            return Err(UnrecognizedOption(spelling));
        };

        if !spec.takes_value {
            options.push(ScannedOption {
                key,
                target: spec.target.clone(),
                operand: None,
                spelling,
            });
            continue;
        }

        let attached = &cluster[position + key.len_utf8()..];
        let (operand, consumed) = if !attached.is_empty() {
            (attached.to_string(), 1)
        } else if let Some(next) = rest.first() {
            (next.clone(), 2)
        } else {
            return Err(MissingOperand(spelling));
        };

        options.push(ScannedOption {
            key,
            target: spec.target.clone(),
            operand: Some(operand),
            spelling,
        });

        return Ok(Some(consumed));
    }

    Ok(Some(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::Error;
    use crate::parameter::{Owner, ParamType, Parameter};

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    fn server_grammar() -> OptionGrammar {
        let params = vec![
            Parameter::new('r', "realtime", ParamType::Bool, None, Owner::Server).unwrap(),
            Parameter::new('v', "verbose", ParamType::Bool, None, Owner::Server).unwrap(),
            Parameter::new('t', "timeout", ParamType::Int, None, Owner::Server).unwrap(),
        ];
        let catalog = Catalog::new(Owner::Server, params).unwrap();
        OptionGrammar::from_catalog(&catalog)
            .with_driver_select(true)
            .unwrap()
    }

    fn keys(scan: &Scan<'_>) -> Vec<char> {
        scan.options.iter().map(|o| o.key).collect()
    }

    #[test]
    fn test_scan_short_options() {
        let args = argv(&["-r", "-t", "200", "-v"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert_eq!(keys(&result), vec!['r', 't', 'v']);
        assert_eq!(result.options[1].operand.as_deref(), Some("200"));
        assert!(result.remaining.is_empty());
    }

    #[test]
    fn test_scan_clusters_and_attached_operand() {
        let args = argv(&["-rvt200"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert_eq!(keys(&result), vec!['r', 'v', 't']);
        assert_eq!(result.options[2].operand.as_deref(), Some("200"));
    }

    #[test]
    fn test_scan_long_options_normalized_to_key() {
        let args = argv(&["--realtime", "--timeout=300", "--timeout", "400"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert_eq!(keys(&result), vec!['r', 't', 't']);
        assert!(result.options.iter().all(|o| o.spelling.starts_with("--")));
        assert_eq!(result.options[1].operand.as_deref(), Some("300"));
        assert_eq!(result.options[2].operand.as_deref(), Some("400"));
        assert_eq!(result.options[2].spelling, "--timeout");
    }

    #[test]
    fn test_scan_stops_after_driver_select() {
        let args = argv(&["-r", "-d", "dummy", "-v", "-p", "256"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert_eq!(keys(&result), vec!['r', 'd']);
        assert_eq!(result.options[1].target, Target::DriverSelect);
        assert_eq!(result.options[1].operand.as_deref(), Some("dummy"));
        assert_eq!(result.remaining, &argv(&["-v", "-p", "256"])[..]);
    }

    #[test]
    fn test_scan_stops_at_non_option() {
        let args = argv(&["-r", "positional", "-v"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert_eq!(keys(&result), vec!['r']);
        assert_eq!(result.remaining, &argv(&["positional", "-v"])[..]);

        let args = argv(&["-", "-r"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert!(result.options.is_empty());
        assert_eq!(result.remaining.len(), 2);
    }

    #[test]
    fn test_scan_consumes_double_dash() {
        let args = argv(&["-r", "--", "-v"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert_eq!(keys(&result), vec!['r']);
        assert_eq!(result.remaining, &argv(&["-v"])[..]);
    }

    #[test]
    fn test_scan_unknown_option_after_known_ends_batch() {
        let args = argv(&["-r", "-x", "-v"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert_eq!(keys(&result), vec!['r']);
        assert_eq!(result.remaining, &argv(&["-x", "-v"])[..]);

        let args = argv(&["-v", "--unknown"]);
        let result = scan(&args, &server_grammar()).unwrap();
        assert_eq!(keys(&result), vec!['v']);
        assert_eq!(result.remaining, &argv(&["--unknown"])[..]);
    }

    #[test]
    fn test_scan_unknown_option_at_head_is_error() {
        let args = argv(&["-x", "-r"]);
        let result = scan(&args, &server_grammar());
        assert!(matches!(result, Err(Error::UnrecognizedOption(opt)) if opt == "-x"));

        let args = argv(&["--real"]);
        let result = scan(&args, &server_grammar());
        assert!(matches!(result, Err(Error::UnrecognizedOption(_))));
    }

    #[test]
    fn test_scan_unknown_letter_inside_cluster_is_error() {
        let args = argv(&["-rx"]);
        let result = scan(&args, &server_grammar());
        assert!(matches!(result, Err(Error::UnrecognizedOption(opt)) if opt == "-x"));
    }

    #[test]
    fn test_scan_missing_operand() {
        let args = argv(&["-t"]);
        assert!(matches!(
            scan(&args, &server_grammar()),
            Err(Error::MissingOperand(opt)) if opt == "-t"
        ));

        let args = argv(&["--driver"]);
        assert!(matches!(
            scan(&args, &server_grammar()),
            Err(Error::MissingOperand(opt)) if opt == "--driver"
        ));
    }

    #[test]
    fn test_scan_unexpected_operand() {
        let args = argv(&["--verbose=yes"]);
        assert!(matches!(
            scan(&args, &server_grammar()),
            Err(Error::UnexpectedOperand(_))
        ));
    }

    #[test]
    fn test_scan_empty_argv() {
        let args: Vec<String> = vec![];
        let result = scan(&args, &server_grammar()).unwrap();
        assert!(result.options.is_empty());
        assert!(result.remaining.is_empty());
    }
}
