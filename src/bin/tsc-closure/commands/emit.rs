//! `tsc-closure emit` command

use anyhow::{Context, Result};

use crate::cli::EmitArgs;
use tsc_closure::backend::LoadingBackend;
use tsc_closure::host::{CompilerHost, FsCompilerHost};
use tsc_closure::ops::{write_externs, write_manifest, EmitPipeline};
use tsc_closure::transform::ModuleWrapTransformer;
use tsc_closure::util::config::HostConfig;
use tsc_closure::util::diagnostic;
use tsc_closure::util::ExecContext;

pub fn execute(args: EmitArgs) -> Result<()> {
    if args.inputs.is_empty() {
        eprintln!("Usage: tsc-closure emit <input.ts> [input2.ts] ...");
        std::process::exit(1);
    }

    let ctx = ExecContext::new(&args.exec_root)?.with_bin_dir(args.bin_dir.clone());

    let mut config = match &args.host_config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    // Command line overrides the config file
    if let Some(root) = args.root_dir {
        config = config.with_root_module_path(root);
    }
    if let Some(prefix) = args.node_modules_prefix {
        config = config.with_node_modules_prefix(prefix);
    }
    if args.es5 {
        config = config.with_es5_mode(true);
    }

    let files = ctx.input_files(&args.inputs);
    let pipeline = EmitPipeline::new(files, ctx.exec_root(), config, ctx.compiler_options())?;

    let host = FsCompilerHost::new(ctx.exec_root());
    let result = pipeline.run(
        &LoadingBackend::new(),
        &host,
        &ModuleWrapTransformer::new(),
        |path, contents| host.write_file(path, contents, false),
    )?;

    diagnostic::emit(&result.diagnostics);
    if !result.success() {
        std::process::exit(1);
    }

    if let Some(path) = &args.externs {
        write_externs(path, &result.externs, ctx.exec_root())
            .with_context(|| format!("failed to write externs to {}", path.display()))?;
    }
    if let Some(path) = &args.manifest {
        write_manifest(path, &result.modules_manifest)?;
    }

    tracing::info!(
        "emitted {} file(s) to {}",
        result.emitted_files.len(),
        pipeline.output_root().display()
    );
    Ok(())
}
