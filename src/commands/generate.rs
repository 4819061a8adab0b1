use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{self, validate_class_name, validate_lib_name, GenerateConfig, MANIFEST_FILE};
use crate::ffi_codegen::{
    generate_csharp_class, generate_rust_bindings, validate_rust_bindings, Language,
};
use crate::ffi_parser::{discover_headers, parse_headers, HeaderFunction};

/// Command-line inputs for `unibind generate`
///
/// Anything left as `None`/empty falls back to the manifest (when no library
/// name is given) or to the built-in defaults.
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub lib_name: Option<String>,
    pub headers: Vec<String>,
    pub header_dirs: Vec<String>,
    pub class_name: Option<String>,
    pub output_folder: Option<String>,
    pub languages: Vec<String>,
    pub export_macro: Option<String>,
    pub manifest: Option<String>,
    pub stdout: bool,
}

/// Fully resolved generator settings
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub lib_name: String,
    pub class_name: String,
    pub output_folder: PathBuf,
    pub headers: Vec<PathBuf>,
    pub export_macro: String,
    pub languages: Vec<Language>,
}

/// One generated source file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub language: Language,
    pub path: PathBuf,
    pub content: String,
}

/// Generate binding sources and write them (or print them with `--stdout`)
pub fn execute(args: &GenerateArgs) -> Result<()> {
    let start = Instant::now();

    let settings = resolve_settings(args)?;
    let functions = parse_headers(&settings.headers, &settings.export_macro)?;

    if functions.is_empty() {
        eprintln!(
            "{} no `{}` declarations found in {} header(s)",
            "warning:".yellow().bold(),
            settings.export_macro,
            settings.headers.len()
        );
    } else if !args.stdout {
        println!(
            "      {} {} function(s) from {} header(s)",
            "Parsed".green().bold(),
            functions.len(),
            settings.headers.len()
        );
        for function in &functions {
            println!("             {}", function.signature().dimmed());
        }
    }

    let files = generate_files(&settings, &functions)?;

    if args.stdout {
        for (i, file) in files.iter().enumerate() {
            if i > 0 {
                println!("\n{}", format!("// {}", file.path.display()).dimmed());
            }
            print!("{}", file.content);
        }
        return Ok(());
    }

    for file in &files {
        write_generated(file)?;
        println!(
            "   {} `{}` ({})",
            "Generated".green().bold(),
            file.path.display(),
            file.language
        );
    }

    let elapsed = start.elapsed();
    println!(
        "    {} `{}` bindings in {:.2}s",
        "Finished".green().bold(),
        settings.lib_name,
        elapsed.as_secs_f64()
    );

    Ok(())
}

/// Merge CLI arguments with the manifest and defaults
pub fn resolve_settings(args: &GenerateArgs) -> Result<GenerateSettings> {
    // Explicit library name: command-line mode, paths relative to cwd.
    // Otherwise everything comes from the manifest, relative to its directory.
    let (lib_name, base, defaults) = match &args.lib_name {
        Some(name) => (name.clone(), PathBuf::new(), GenerateConfig::default()),
        None => {
            let manifest = args.manifest.as_deref().unwrap_or(MANIFEST_FILE);
            let config = config::load_config(manifest)?;
            let base = Path::new(manifest)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            (config.library.name, base, config.generate)
        }
    };

    validate_lib_name(&lib_name)?;

    // Before any field of `defaults` is moved out
    let languages = if args.languages.is_empty() {
        defaults.languages()?
    } else {
        GenerateConfig {
            languages: args.languages.clone(),
            ..GenerateConfig::default()
        }
        .languages()?
    };

    let class_name = args.class_name.clone().unwrap_or(defaults.class_name);
    validate_class_name(&class_name)?;

    let output_folder = match &args.output_folder {
        Some(folder) if !folder.is_empty() => PathBuf::from(folder),
        _ => base.join(&defaults.output_folder),
    };

    let export_macro = args.export_macro.clone().unwrap_or(defaults.export_macro);

    let mut headers: Vec<PathBuf> = if args.headers.is_empty() && args.header_dirs.is_empty() {
        defaults.headers.iter().map(|h| base.join(h)).collect()
    } else {
        args.headers.iter().map(PathBuf::from).collect()
    };

    let header_dirs: Vec<PathBuf> = if args.headers.is_empty() && args.header_dirs.is_empty() {
        defaults.header_dirs.iter().map(|d| base.join(d)).collect()
    } else {
        args.header_dirs.iter().map(PathBuf::from).collect()
    };

    for dir in &header_dirs {
        for header in discover_headers(dir)? {
            if !headers.contains(&header) {
                headers.push(header);
            }
        }
    }

    if headers.is_empty() {
        bail!(
            "No header files given. Pass -f <header> or list headers in {}",
            MANIFEST_FILE
        );
    }

    Ok(GenerateSettings {
        lib_name,
        class_name,
        output_folder,
        headers,
        export_macro,
        languages,
    })
}

/// Render every requested language
pub fn generate_files(
    settings: &GenerateSettings,
    functions: &[HeaderFunction],
) -> Result<Vec<GeneratedFile>> {
    let source_names: Vec<String> = settings
        .headers
        .iter()
        .filter_map(|h| h.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();

    let mut files = Vec::new();

    for language in &settings.languages {
        let content = match language {
            Language::CSharp => {
                generate_csharp_class(functions, &settings.class_name, &settings.lib_name)
            }
            Language::Rust => {
                let code = generate_rust_bindings(functions, &settings.lib_name, &source_names);
                validate_rust_bindings(&code)?;
                code
            }
        };

        let file_name = language.output_file_name(&settings.class_name, &settings.lib_name);
        files.push(GeneratedFile {
            language: *language,
            path: settings.output_folder.join(file_name),
            content,
        });
    }

    Ok(files)
}

fn write_generated(file: &GeneratedFile) -> Result<()> {
    if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create output folder: {}", parent.display()))?;
    }

    fs::write(&file.path, &file.content)
        .context(format!("Failed to write {}", file.path.display()))?;

    Ok(())
}
