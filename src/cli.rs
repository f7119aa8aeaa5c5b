use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::logging::ColorOption;

/// Generates a module-definition (.def) export file for a C++/WinRT DLL
/// from its .idl declarations and a compiler symbol listing.
#[derive(Debug, Parser)]
#[command(version, max_term_width = 100)]
pub struct Cli {
    /// Solution name; a trailing .sln extension is stripped
    pub solution: String,

    /// Project name [default: the solution name]
    #[arg(long, value_name = "name")]
    pub project: Option<String>,

    /// Directory containing the solution directory
    #[arg(long, value_name = "dir", default_value = ".")]
    pub root: PathBuf,

    /// Build output subdirectory holding the compiled .obj files
    #[arg(long, value_name = "dir", default_value = "x64/Debug")]
    pub config: PathBuf,

    /// Read symbols from a linker .map file instead of running dumpbin
    #[arg(long, value_name = "file")]
    pub map: Option<PathBuf>,

    /// Path to the dumpbin executable
    #[arg(long, value_name = "exe", default_value = "dumpbin.exe")]
    pub dumpbin: PathBuf,

    /// Language-projection namespace embedded in decorated names
    #[arg(long, value_name = "name", default_value = "winrt")]
    pub binding: String,

    /// Also match decorated names that end the line (no trailing space)
    #[arg(long)]
    pub loose_suffix: bool,

    /// Path to write the .def file [default: <project dir>/<project>.def]
    #[arg(short, long, value_name = "file")]
    pub output: Option<PathBuf>,

    /// Increase logging verbosity
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Use colors in diagnostic messages
    #[arg(long, value_enum, value_name = "color", default_value_t)]
    pub color_diagnostics: ColorOption,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn minimal_invocation() {
        let cli = Cli::try_parse_from(["idl2def", "ImgUtilsX"]).expect("args must parse");
        assert_eq!(cli.solution, "ImgUtilsX");
        assert_eq!(cli.project, None);
        assert!(!cli.loose_suffix);
    }

    #[test]
    fn map_and_output_flags() {
        let cli = Cli::try_parse_from([
            "idl2def",
            "ImgUtilsX",
            "--map",
            "build/ImgUtilsX.map",
            "-o",
            "exports.def",
            "-vv",
        ])
        .expect("args must parse");

        assert!(cli.map.is_some());
        assert!(cli.output.is_some());
        assert_eq!(cli.verbose, 2);
    }
}
