//! Drives the parse → dump → correlate → assemble pipeline for one
//! project and writes the resulting `.def` file.
//!
//! The directory conventions follow a stock Visual Studio solution tree:
//! `<root>/<solution>/<project>/` holds the `.idl` sources and
//! `<root>/<solution>/<project>/<config>/` the compiled `.obj` files. Most
//! failures degrade per input (logged, contribution empty); only a missing
//! project directory and an unwritable output destination are fatal.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    correlate::{DecorationNamespace, PatternSuffix, correlate},
    defgen::{DefModule, ExportSet},
    symsrc::{DumpbinTool, SymbolDumper, SymbolListing},
};

pub struct DefGenerator {
    solution: String,
    project: String,
    root: PathBuf,
    config_dir: PathBuf,
    map_file: Option<PathBuf>,
    output: Option<PathBuf>,
    namespace: DecorationNamespace,
    dumper: Box<dyn SymbolDumper>,
}

impl DefGenerator {
    /// Creates a generator for `solution`, stripping a trailing `.sln`
    /// extension if present. The project name, library name and decoration
    /// container all default to the solution name.
    pub fn new(solution: &str) -> Self {
        let solution = solution
            .strip_suffix(".sln")
            .unwrap_or(solution)
            .to_string();

        Self {
            namespace: DecorationNamespace::new(&solution),
            project: solution.clone(),
            solution,
            root: PathBuf::from("."),
            config_dir: PathBuf::from("x64/Debug"),
            map_file: None,
            output: None,
            dumper: Box::new(DumpbinTool::default()),
        }
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Build output subdirectory holding the `.obj` files, relative to the
    /// project directory.
    pub fn config_dir(mut self, config_dir: impl Into<PathBuf>) -> Self {
        self.config_dir = config_dir.into();
        self
    }

    /// Substitutes a linker `.map` file for the dumpbin symbol source. The
    /// same map is used for every `.idl` file of the run.
    pub fn map_file(mut self, map_file: impl Into<PathBuf>) -> Self {
        self.map_file = Some(map_file.into());
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn binding(mut self, binding: impl Into<String>) -> Self {
        self.namespace = self.namespace.with_binding(binding);
        self
    }

    pub fn suffix(mut self, suffix: PatternSuffix) -> Self {
        self.namespace = self.namespace.with_suffix(suffix);
        self
    }

    pub fn dumper(mut self, dumper: Box<dyn SymbolDumper>) -> Self {
        self.dumper = dumper;
        self
    }

    /// Runs the pipeline and returns the path of the written `.def` file.
    pub fn run(&self) -> anyhow::Result<PathBuf> {
        let proj_dir = self.root.join(&self.solution).join(&self.project);

        let idl_files = find_idl_files(&proj_dir)
            .with_context(|| format!("scanning {} for .idl files", proj_dir.display()))?;
        if idl_files.is_empty() {
            anyhow::bail!("no .idl files found in {}", proj_dir.display());
        }

        let mut def = DefModule::new(&self.solution);

        for idl_path in &idl_files {
            log::info!("processing {}", idl_path.display());
            if let Err(e) = self.process_idl(idl_path, &mut def) {
                // A bad input loses its contribution, not the run.
                log::error!("{}: {e:#}", idl_path.display());
            }
        }

        let out = self
            .output
            .clone()
            .unwrap_or_else(|| proj_dir.join(format!("{}.def", self.project)));

        std::fs::write(&out, def.render())
            .with_context(|| format!("cannot write {}", out.display()))?;

        Ok(out)
    }

    fn process_idl(&self, idl_path: &Path, def: &mut DefModule) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(idl_path).context("cannot read interface definition")?;
        let parsed = ridl::parse(&text)?;

        for warning in &parsed.warnings {
            log::warn!("{}: {warning}", idl_path.display());
        }

        if parsed.classes.is_empty() {
            log::warn!("{}: no runtimeclass declarations found", idl_path.display());
            return Ok(());
        }

        let listing = self.symbol_listing(idl_path);

        for class in &parsed.classes {
            log::debug!(
                "correlating runtimeclass {} ({} members)",
                class.name,
                class.members.len()
            );

            let matches = correlate(class, listing.lines(), &self.namespace)
                .with_context(|| format!("correlating runtimeclass {}", class.name))?;
            def.push_group(ExportSet::from_matches(&class.name, &matches));
        }

        Ok(())
    }

    /// Acquires the symbol listing for one `.idl` file. A failed source is
    /// logged and degrades to an empty listing so the run continues.
    fn symbol_listing(&self, idl_path: &Path) -> SymbolListing {
        let result = if let Some(map) = &self.map_file {
            SymbolListing::from_map_file(map)
        } else {
            let obj = self.object_path(idl_path);
            log::debug!("dumping symbols from {}", obj.display());
            SymbolListing::from_object(&obj, self.dumper.as_ref())
        };

        match result {
            Ok(listing) => listing,
            Err(e) => {
                log::error!("{e}");
                SymbolListing::empty()
            }
        }
    }

    /// Maps `<proj>/Foo.idl` to `<proj>/<config>/Foo.obj`.
    fn object_path(&self, idl_path: &Path) -> PathBuf {
        let parent = idl_path.parent().unwrap_or_else(|| Path::new("."));
        let mut name = idl_path
            .file_stem()
            .unwrap_or(OsStr::new(""))
            .to_os_string();
        name.push(".obj");
        parent.join(&self.config_dir).join(name)
    }
}

/// Lists the `.idl` files in `dir`, sorted by name for deterministic
/// processing order.
fn find_idl_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new("idl")))
            && path.is_file()
        {
            files.push(path);
        }
    }

    files.sort_unstable();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::symsrc::{SymbolDumper, SymbolSourceError};

    use super::DefGenerator;

    struct CannedDumper(String);

    impl SymbolDumper for CannedDumper {
        fn dump(&self, _object: &Path) -> Result<String, SymbolSourceError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn solution_extension_stripped() {
        let generator = DefGenerator::new("ImgUtilsX.sln");
        assert_eq!(generator.solution, "ImgUtilsX");
        assert_eq!(generator.project, "ImgUtilsX");
    }

    #[test]
    fn object_path_layout() {
        let generator = DefGenerator::new("ImgUtilsX");
        let obj = generator.object_path(Path::new("repos/ImgUtilsX/ImgUtilsX/IMan.idl"));
        assert_eq!(
            obj,
            Path::new("repos/ImgUtilsX/ImgUtilsX/x64/Debug/IMan.obj")
        );
    }

    #[test]
    fn missing_project_dir_is_fatal() {
        let generator =
            DefGenerator::new("NoSuchSolution").dumper(Box::new(CannedDumper(String::new())));
        assert!(generator.run().is_err());
    }
}
