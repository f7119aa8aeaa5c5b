use std::process::ExitCode;

use clap::Parser;

use idl2def::{
    cli::Cli,
    correlate::PatternSuffix,
    generator::DefGenerator,
    logging,
    symsrc::DumpbinTool,
};

/// cli entrypoint
fn main() -> ExitCode {
    let args = Cli::parse();

    let max_level = match args.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };

    if let Err(e) = logging::init(max_level, args.color_diagnostics) {
        eprintln!("failed installing logger: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = try_main(args) {
        log::error!("{e:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main(args: Cli) -> anyhow::Result<()> {
    let mut generator = DefGenerator::new(&args.solution)
        .root(args.root)
        .config_dir(args.config)
        .binding(args.binding)
        .dumper(Box::new(DumpbinTool::new(args.dumpbin)));

    if let Some(project) = args.project {
        generator = generator.project(project);
    }

    if let Some(map) = args.map {
        generator = generator.map_file(map);
    }

    if let Some(output) = args.output {
        generator = generator.output(output);
    }

    if args.loose_suffix {
        generator = generator.suffix(PatternSuffix::Bare);
    }

    let written = generator.run()?;
    log::info!("def file saved at: {}", written.display());

    Ok(())
}
