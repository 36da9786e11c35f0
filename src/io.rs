use std::fmt;
use std::fs;
use std::path::Path;

use crate::allocator::Allocator;
use crate::report::{display_memory, display_processes};

/// One line of a request script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Alloc { process_id: i32, size: usize },
    Free { process_id: i32 },
    Show,
    Memory,
    Processes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Tallies of a script run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub allocated: usize,
    pub refused: usize,
    pub freed: usize,
    pub not_found: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Script {
    pub requests: Vec<Request>,
}

impl Script {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read script file: {}", e))?;
        Self::parse(&content).map_err(|e| e.to_string())
    }

    /// Parse a script. `#` starts a comment, blank lines are skipped.
    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        let mut requests = Vec::new();
        for (index, raw) in content.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("");
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let request = Self::parse_request(&tokens).map_err(|message| ScriptError {
                line: index + 1,
                message,
            })?;
            requests.push(request);
        }
        Ok(Script { requests })
    }

    fn parse_request(tokens: &[&str]) -> Result<Request, String> {
        let expect_args = |n: usize| {
            if tokens.len() != n + 1 {
                Err(format!(
                    "'{}' takes {} argument(s), got {}",
                    tokens[0],
                    n,
                    tokens.len() - 1
                ))
            } else {
                Ok(())
            }
        };

        match tokens[0] {
            "alloc" => {
                expect_args(2)?;
                let process_id: i32 = tokens[1]
                    .parse()
                    .map_err(|_| format!("Invalid process id: {}", tokens[1]))?;
                let size: usize = tokens[2]
                    .parse()
                    .map_err(|_| format!("Invalid size: {}", tokens[2]))?;
                Ok(Request::Alloc { process_id, size })
            }
            "free" => {
                expect_args(1)?;
                let process_id: i32 = tokens[1]
                    .parse()
                    .map_err(|_| format!("Invalid process id: {}", tokens[1]))?;
                Ok(Request::Free { process_id })
            }
            "show" => expect_args(0).map(|()| Request::Show),
            "memory" => expect_args(0).map(|()| Request::Memory),
            "processes" => expect_args(0).map(|()| Request::Processes),
            other => Err(format!("Unknown command: {}", other)),
        }
    }

    /// The request sequence of the reference run
    pub fn reference() -> Self {
        Script {
            requests: vec![
                Request::Alloc { process_id: 1, size: 120 },
                Request::Alloc { process_id: 2, size: 180 },
                Request::Alloc { process_id: 3, size: 300 },
                Request::Show,
                Request::Free { process_id: 1 },
                Request::Show,
            ],
        }
    }

    /// Execute every request in order. Refused allocations are reported
    /// and do not stop the run.
    pub fn run(&self, allocator: &mut Allocator) -> RunSummary {
        let mut summary = RunSummary::default();
        for request in &self.requests {
            match *request {
                Request::Alloc { process_id, size } => match allocator.allocate(process_id, size) {
                    Ok(offset) => {
                        summary.allocated += 1;
                        println!(
                            "process {} allocated {} bytes at offset {}",
                            process_id, size, offset
                        );
                    }
                    Err(e) => {
                        summary.refused += 1;
                        println!("{}", e);
                    }
                },
                Request::Free { process_id } => {
                    let outcome = allocator.free(process_id);
                    if outcome.is_freed() {
                        summary.freed += 1;
                    } else {
                        summary.not_found += 1;
                    }
                    println!("{}", outcome);
                }
                Request::Show => {
                    display_memory(allocator);
                    display_processes(allocator);
                }
                Request::Memory => display_memory(allocator),
                Request::Processes => display_processes(allocator),
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let content = "# reference run\n\
                       alloc 1 120\n\
                       \n\
                       alloc 2 180   # three pages\n\
                       free 1\n\
                       show\n\
                       memory\n\
                       processes\n";
        let script = Script::parse(content).unwrap();
        assert_eq!(
            script.requests,
            vec![
                Request::Alloc { process_id: 1, size: 120 },
                Request::Alloc { process_id: 2, size: 180 },
                Request::Free { process_id: 1 },
                Request::Show,
                Request::Memory,
                Request::Processes,
            ]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(Script::parse("").unwrap().requests.is_empty());
        assert!(Script::parse("# nothing\n\n").unwrap().requests.is_empty());
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Script::parse("alloc 1 10\nevict 1\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("evict"));
        assert!(err.to_string().starts_with("line 2:"));
    }

    #[test]
    fn test_parse_wrong_arity() {
        let err = Script::parse("alloc 1").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("2 argument"));

        let err = Script::parse("show\nfree").unwrap_err();
        assert_eq!(err.line, 2);

        assert!(Script::parse("show 3").is_err());
    }

    #[test]
    fn test_parse_bad_numbers() {
        let err = Script::parse("alloc one 10").unwrap_err();
        assert!(err.message.contains("Invalid process id"));

        let err = Script::parse("alloc 1 -10").unwrap_err();
        assert!(err.message.contains("Invalid size"));

        // negative ids parse; the allocator decides whether they are valid
        assert_eq!(
            Script::parse("free -1").unwrap().requests,
            vec![Request::Free { process_id: -1 }]
        );
    }

    fn temp_script(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("paging-sim-{}-{}.txt", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_from_file() {
        let path = temp_script("valid", "alloc 1 120\nfree 1\n");
        let script = Script::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(script.requests.len(), 2);
    }

    #[test]
    fn test_from_file_missing() {
        let path = std::env::temp_dir().join("paging-sim-does-not-exist.txt");
        let err = Script::from_file(&path).unwrap_err();
        assert!(err.starts_with("Failed to read script file:"), "{}", err);
    }

    #[test]
    fn test_from_file_parse_error() {
        let path = temp_script("bad", "alloc 1 120\nalloc 2\n");
        let err = Script::from_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.starts_with("line 2:"), "{}", err);
        assert!(err.contains("'alloc' takes 2 argument(s), got 1"), "{}", err);
    }

    #[test]
    fn test_run_reference_script() {
        let mut allocator = Allocator::default();
        let summary = Script::reference().run(&mut allocator);

        assert_eq!(
            summary,
            RunSummary { allocated: 3, refused: 0, freed: 1, not_found: 0 }
        );
        assert!(allocator.frames_of(1).is_empty());
        assert_eq!(allocator.frames_of(2), vec![2, 3, 4]);
        assert_eq!(allocator.frames_of(3), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_run_counts_refusals() {
        let script = Script::parse(
            "alloc 1 1024\n\
             alloc 2 1\n\
             alloc 1 1\n\
             free 3\n\
             free 1\n\
             free 1\n",
        )
        .unwrap();
        let mut allocator = Allocator::default();
        let summary = script.run(&mut allocator);

        assert_eq!(
            summary,
            RunSummary { allocated: 1, refused: 2, freed: 1, not_found: 2 }
        );
        assert_eq!(allocator.free_pages(), 16);
    }
}
