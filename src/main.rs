use clap::{Parser, Subcommand};
use colored::Colorize;
use unibind::commands;
use unibind::commands::generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "unibind")]
#[command(about = "Native library bindings for game-engine hosts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a binding project with a unibind.toml and a starter header
    Init {
        /// Base name of the native library
        lib_name: String,
    },
    /// Generate bindings from C headers
    /// Without LIB_NAME, settings are read from unibind.toml
    Generate {
        /// Base name of the native library (e.g. mylib)
        lib_name: Option<String>,
        /// Header file to read (repeatable)
        #[arg(short = 'f', long = "hfile")]
        hfile: Vec<String>,
        /// Directory searched for headers (repeatable)
        #[arg(short = 'd', long = "header-dir")]
        header_dir: Vec<String>,
        /// Name of the generated C# class (default: CppNative)
        #[arg(long = "cpp-class", alias = "cpp_class")]
        cpp_class: Option<String>,
        /// Output folder (default: current directory)
        #[arg(long = "output-folder", alias = "output_folder")]
        output_folder: Option<String>,
        /// Output language: csharp or rust (repeatable)
        #[arg(long)]
        lang: Vec<String>,
        /// Macro marking exported declarations (default: EXTERN_C_API)
        #[arg(long)]
        export_macro: Option<String>,
        /// Manifest to read when LIB_NAME is omitted
        #[arg(long)]
        manifest: Option<String>,
        /// Print generated code instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// Show the library identifier for every target platform
    Platform {
        /// Base name of the native library (default: mylib)
        lib_name: Option<String>,
    },
    /// Load the native library and call an exported function
    Call {
        /// add, subtract, multiply or divide
        function: String,
        #[arg(allow_hyphen_values = true)]
        a: i32,
        #[arg(allow_hyphen_values = true)]
        b: i32,
        /// Library file to load instead of the build target's default
        #[arg(long)]
        lib: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { lib_name } => commands::init::execute(&lib_name),
        Commands::Generate {
            lib_name,
            hfile,
            header_dir,
            cpp_class,
            output_folder,
            lang,
            export_macro,
            manifest,
            stdout,
        } => commands::generate::execute(&GenerateArgs {
            lib_name,
            headers: hfile,
            header_dirs: header_dir,
            class_name: cpp_class,
            output_folder,
            languages: lang,
            export_macro,
            manifest,
            stdout,
        }),
        Commands::Platform { lib_name } => commands::platform::execute(lib_name.as_deref()),
        Commands::Call { function, a, b, lib } => {
            commands::call::execute(&function, a, b, lib.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
