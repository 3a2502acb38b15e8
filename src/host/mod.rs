//! Compiler host abstraction.
//!
//! The backend compiles against a `CompilerHost`: a small set of mandatory
//! file operations plus optional capabilities (custom module resolution,
//! directory listing, hashing, ...). The emit pipeline never hands the
//! backend's own host straight back to it; it goes through a [`HostFacade`]
//! that forwards exactly the capabilities the backend host has and pins a
//! few operations to build-system friendly behaviour.
//!
//! ```text
//!   ┌──────────────┐   probes once   ┌──────────────────┐
//!   │  HostFacade  │ ──────────────▶ │ delegate host    │
//!   │  (slots)     │ ◀────────────── │ (FsCompilerHost, │
//!   └──────┬───────┘  &dyn Cap refs  │  backend host)   │
//!          │                         └──────────────────┘
//!          ▼
//!      Backend::create_program
//! ```

pub mod capabilities;
pub mod facade;
pub mod fs_host;
pub mod trait_def;
pub mod types;

pub use capabilities::{
    CancellationSource, Capability, CapabilitySet, CommandLineLookup, ContentHasher,
    DirectoryLister, DirectoryProbe, DirectoryReader, EnvironmentLookup, InvalidatedResolutions,
    ModuleLiteralResolver, ModuleNameResolver, PathCanonicalizer, ResolutionCacheProvider,
    SourceFileByPath, TraceSink, TypeReferenceDirectiveResolver, TypeReferenceResolver,
};
pub use facade::HostFacade;
pub use fs_host::FsCompilerHost;
pub use trait_def::CompilerHost;
pub use types::{
    CancellationToken, CompilerOptions, JsDocParsingMode, ModuleKind, ModuleResolutionCache,
    ParsedCommandLine, ResolvedModule, ResolvedModuleWithFailedLookups,
    ResolvedTypeReferenceDirective, ResolvedTypeReferenceWithFailedLookups, ScriptTarget,
    SourceFile,
};
