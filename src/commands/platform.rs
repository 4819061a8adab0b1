use anyhow::Result;
use colored::Colorize;

use crate::config::validate_lib_name;
use crate::native::{LibraryTarget, LIB_NAME};

/// Show the library identifier each target resolves to
pub fn execute(lib_name: Option<&str>) -> Result<()> {
    let lib_name = lib_name.unwrap_or("mylib");
    validate_lib_name(lib_name)?;

    for line in describe_targets(lib_name) {
        println!("{}", line);
    }

    if lib_name == "mylib" {
        println!(
            "\n{} this build binds `{}`",
            "info:".blue().bold(),
            LIB_NAME
        );
    }

    Ok(())
}

/// One line per target: name, identifier, on-disk file
pub fn describe_targets(lib_name: &str) -> Vec<String> {
    LibraryTarget::ALL
        .iter()
        .map(|target| {
            let file = target
                .file_name(lib_name)
                .unwrap_or_else(|| "statically linked".to_string());
            let line = format!(
                "  {:<9} {:<20} ({})",
                target.to_string(),
                target.identifier(lib_name),
                file
            );
            if target.is_current() {
                format!("{} {}", line, "[current]".green().bold())
            } else {
                line
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_targets() {
        let lines = describe_targets("audio");

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("windows") && lines[0].contains("(audio.dll)"));
        assert!(lines[1].contains("libaudio.so"));
        assert!(lines[2].contains("libaudio.dylib"));
        assert!(lines[3].contains("__Internal") && lines[3].contains("statically linked"));
        assert_eq!(lines.iter().filter(|l| l.contains("[current]")).count(), 1);
    }
}
