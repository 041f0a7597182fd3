use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML request file and deserialise into a typed struct.
/// `.yaml` / `.yml` files are parsed as YAML, anything else as JSON.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    log::debug!("read {} bytes from {}", contents.len(), canonical.display());

    let parsed = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use amortization_core::analysis::ScheduleInput;
    use std::io::Write;

    fn temp_file(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("amort-{}-{name}", std::process::id()));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_json_request() {
        let path = temp_file(
            "req.json",
            r#"{"principal":"12000","annualInterestRate":"0","loanTermMonths":12,"startDate":"2024-01-01"}"#,
        );
        let req: ScheduleInput = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(req.terms.loan_term_months(), 12);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_reads_yaml_request() {
        let path = temp_file(
            "req.yaml",
            "principal: \"50000\"\nannualInterestRate: \"5\"\nloanTermMonths: 60\nstartDate: 2024-01-15\n",
        );
        let req: ScheduleInput = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(req.terms.loan_term_months(), 60);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_terms_fail_to_parse() {
        let path = temp_file(
            "bad.json",
            r#"{"principal":"1000","annualInterestRate":"5","loanTermMonths":0,"startDate":"2024-01-01"}"#,
        );
        assert!(read_input::<ScheduleInput>(path.to_str().unwrap()).is_err());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        assert!(read_input::<ScheduleInput>("/definitely/not/here.json").is_err());
    }
}
