//! Batch driver.
//!
//! A [`Generator`] owns one [`Classifier`], so types shared by several
//! roots are classified once. Each root is handled on its own:
//!
//! 1. classify the root class
//! 2. collect every type it needs a file for
//! 3. name the output files and check them against the files already
//!    produced in this batch
//! 4. render each new file
//!
//! A root that fails at any step reports into the [`DiagnosticQueue`] and
//! leaves no files behind; the batch carries on with the next root.

use idl_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, ErrorGuaranteed};
use idl_ir::ClassModel;
use idl_types::{ClassificationFailure, Classifier};
use rustc_hash::FxHashMap;

use crate::{GeneratorConfig, IdlContext, OutputCollision, OutputKind};

/// One rendered IDL file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OutputFile {
    /// Path relative to the output root, `/`-separated.
    pub path: String,
    pub module_path: Vec<String>,
    /// File name without the `.idl` extension.
    pub file_base_name: String,
    /// Java name of the type the file defines.
    pub java_name: String,
    pub kind: OutputKind,
    pub contents: String,
}

pub struct Generator<'m, M: ClassModel + ?Sized> {
    classifier: Classifier<'m, M>,
    config: GeneratorConfig,
    queue: DiagnosticQueue,
    /// Every path produced in this batch, to the Java name that owns it.
    written: FxHashMap<String, String>,
}

impl<'m, M: ClassModel + ?Sized> Generator<'m, M> {
    pub fn new(model: &'m M, config: GeneratorConfig) -> Self {
        Generator {
            classifier: Classifier::new(model, config.mapping_options()),
            config,
            queue: DiagnosticQueue::new(),
            written: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Switch configuration. Mapping changes discard every classified type.
    pub fn reconfigure(&mut self, config: GeneratorConfig) {
        self.classifier.reconfigure(config.mapping_options());
        self.config = config;
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.queue
    }

    /// Take the diagnostics queued so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.queue.flush()
    }

    /// Generate every root in order.
    ///
    /// Fails if any root failed; every failure is in the queue. Callers
    /// that want the files of the roots that succeeded use
    /// [`Self::generate_root`] directly.
    pub fn generate<S: AsRef<str>>(&mut self, roots: &[S]) -> Result<Vec<OutputFile>, ErrorGuaranteed> {
        let mut files = Vec::new();
        let mut failed = None;
        for root in roots {
            match self.generate_root(root.as_ref()) {
                Ok(root_files) => files.extend(root_files),
                Err(guarantee) => failed = Some(guarantee),
            }
        }
        match failed {
            Some(guarantee) => Err(guarantee),
            None => Ok(files),
        }
    }

    /// Files for one root class that no earlier root produced.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn generate_root(&mut self, root: &str) -> Result<Vec<OutputFile>, ErrorGuaranteed> {
        let id = match self.classifier.classify_class(root) {
            Ok(id) => id,
            Err(failure) => {
                tracing::debug!(errors = failure.errors.len(), "root not mapped");
                return Err(self.report(&failure));
            }
        };

        let ctx = IdlContext::new(self.classifier.model(), self.classifier.pool(), &self.config);
        let references = ctx.collect_references(id);
        let outputs = match ctx.output_types_for(&references) {
            Ok(outputs) => outputs,
            Err(collision) => return Err(self.queue.emit_error(collision.to_diagnostic())),
        };

        let mut fresh = Vec::with_capacity(outputs.len());
        for output in outputs {
            let path = output.path();
            let java_name = &ctx.get(output.ty).java_name;
            match self.written.get(&path) {
                Some(owner) if owner == java_name => {
                    tracing::trace!(%path, "already generated");
                }
                Some(owner) => {
                    let collision = OutputCollision {
                        path,
                        first: owner.clone(),
                        second: java_name.clone(),
                    };
                    return Err(self.queue.emit_error(collision.to_diagnostic()));
                }
                None => fresh.push((path, output)),
            }
        }

        let mut files = Vec::with_capacity(fresh.len());
        for (path, output) in fresh {
            let java_name = ctx.get(output.ty).java_name.clone();
            self.written.insert(path.clone(), java_name.clone());
            let Some(contents) = ctx.emit(&output) else {
                continue;
            };
            files.push(OutputFile {
                path,
                module_path: output.module_path,
                file_base_name: output.file_base_name,
                java_name,
                kind: output.kind,
                contents,
            });
        }
        tracing::debug!(files = files.len(), "root generated");
        Ok(files)
    }

    fn report(&mut self, failure: &ClassificationFailure) -> ErrorGuaranteed {
        for diagnostic in failure.diagnostics() {
            self.queue.push(diagnostic);
        }
        match self.queue.guarantee() {
            Some(guarantee) => guarantee,
            None => self.queue.emit_error(
                Diagnostic::error(ErrorCode::Unmappable)
                    .with_message(failure.to_string())
                    .with_subject(failure.root.clone()),
            ),
        }
    }
}
