//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use log::info;

use crate::adapter::config::Config;
use crate::adapter::host::BridgeHostSession;
use crate::adapter::imaging::GifAssembler;
use crate::adapter::repositories::file_scene_repository::FileSceneRepository;
use crate::adapter::repositories::json_report_repository::JsonReportRepository;
use crate::application::procedures::{
    DisableSegmentScaleCompensateProcedure, ExportAnimationProcedure, ReferenceRepair,
    RenderPreviewProcedure, RepairReferencesProcedure, SetRotateOrderProcedure,
    SnapJointProcedure,
};
use crate::application::use_cases::discover_scenes::DiscoverScenesUseCase;
use crate::application::use_cases::process_batch::ProcessBatchUseCase;
use crate::domain::entities::batch_job::BatchJob;
use crate::domain::entities::processing_result::{BatchReport, ProcessingResult};
use crate::domain::procedure::SceneProcedure;
use crate::domain::repositories::host_session::HostSession;
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::repositories::scene_repository::SceneQuery;

use super::cli::{Args, Command};

/// Scene Batch Workflow
pub struct SceneBatchWorkflow {
    config: Config,
    discover_use_case: DiscoverScenesUseCase<FileSceneRepository>,
    report_repository: Arc<JsonReportRepository>,
}

impl SceneBatchWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let scene_repo = Arc::new(FileSceneRepository::new());

        Self {
            config,
            discover_use_case: DiscoverScenesUseCase::new(scene_repo),
            report_repository: Arc::new(JsonReportRepository::new()),
        }
    }

    /// Execute the workflow against the host bridge
    pub async fn execute(&self, args: Args) -> Result<()> {
        let mut session = BridgeHostSession::new(self.config.host.clone());
        self.run_with_session(args, &mut session).await?;
        Ok(())
    }

    /// Execute the workflow with the given host session
    ///
    /// ドライランや対象シーンが無い場合はセッションを起動せず `None` を返す。
    pub async fn run_with_session(
        &self,
        args: Args,
        session: &mut dyn HostSession,
    ) -> Result<Option<BatchReport>> {
        info!("Starting scene batch...");
        info!("Dry run: {}", args.dry_run);

        let query = SceneQuery {
            dir: args.dir.clone().unwrap_or_else(|| self.config.scene_dir.clone()),
            extensions: self.config.extensions.clone(),
            allow_list: if args.only.is_empty() {
                self.config.allow_list.clone()
            } else {
                args.only.clone()
            },
        };
        let output_root = args
            .output
            .as_ref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
            .unwrap_or_else(|| self.config.output_root());

        let procedure = self.build_procedure(&args.command)?;

        println!("✓ Using configuration:");
        println!("  Procedure: {}", procedure.name());
        println!("  Scenes: {}", query.dir);
        println!("  Output: {}", output_root.display());
        if !query.allow_list.is_empty() {
            println!("  Only: {}", query.allow_list.join(", "));
        }

        let scenes = self.discover_use_case.execute(&query).await?;
        println!("✓ Found {} scene files in {}", scenes.len(), query.dir);

        if scenes.is_empty() {
            println!("No scene files to process. Exiting.");
            return Ok(None);
        }

        let job = BatchJob::new(scenes, output_root, procedure);

        if args.dry_run {
            println!("✓ Dry-run mode (host is not started)");
            println!("  Would {} {} scenes:", job.procedure().name(), job.len());
            for scene in job.scenes() {
                println!("    - {}", scene.path().display());
                for artifact in job.procedure().planned_artifacts(scene, job.output_root()) {
                    println!("      → {}", artifact.display());
                }
            }
            return Ok(None);
        }

        let batch_id = uuid::Uuid::new_v4().to_string();
        let use_case = ProcessBatchUseCase::new(self.config.processing_config());
        let report = use_case.execute(&job, &batch_id, session).await?;

        for scene_result in &report.results {
            let name = scene_result.scene.logical_name();
            match &scene_result.result {
                ProcessingResult::Succeeded { artifacts } => {
                    println!("✓ {}", name);
                    for artifact in artifacts {
                        println!("    → {}", artifact.display());
                    }
                }
                ProcessingResult::Skipped { reason } => println!("⚠ {} skipped: {}", name, reason),
                ProcessingResult::Failed(e) => println!("✗ {}: {}", name, e),
            }
        }

        println!(
            "✓ Processed {} scenes ({} succeeded, {} skipped, {} failed)",
            report.results.len(),
            report.succeeded_count(),
            report.skipped_count(),
            report.failed_count()
        );

        if let Some(report_path) = args.report.as_ref().or(self.config.report_path.as_ref()) {
            self.report_repository.save(report_path, &report).await?;
            println!("✓ Wrote report to {}", report_path);
        }

        Ok(Some(report))
    }

    /// コマンドに対応するシーン処理を組み立てる
    fn build_procedure(&self, command: &Command) -> Result<Arc<dyn SceneProcedure>> {
        let procedure: Arc<dyn SceneProcedure> = match command {
            Command::Export => Arc::new(ExportAnimationProcedure::new(
                self.config.export.clone(),
                self.config.selection.clone(),
                self.config.cleanup_nodes.clone(),
            )),
            Command::FixReferences { search, replace } => {
                let configured = self.config.reference_repair.as_ref();
                let search = search
                    .clone()
                    .or_else(|| configured.map(|r| r.search_token.clone()));
                let replace = replace
                    .clone()
                    .or_else(|| configured.map(|r| r.replace_path.clone()));
                match (search, replace) {
                    (Some(search), Some(replace)) => Arc::new(RepairReferencesProcedure::new(
                        ReferenceRepair::new(search, replace),
                    )),
                    _ => bail!(
                        "fix-references needs --search and --replace (or reference_repair in the config file)"
                    ),
                }
            }
            Command::Render { search, replace } => {
                let repair = match (search, replace) {
                    (Some(search), Some(replace)) => {
                        Some(ReferenceRepair::new(search.clone(), replace.clone()))
                    }
                    _ => self.config.reference_repair.clone(),
                };
                Arc::new(RenderPreviewProcedure::new(
                    self.config.render.clone(),
                    repair,
                    Arc::new(GifAssembler::new()),
                ))
            }
            Command::RotateOrder { order, preserve } => {
                Arc::new(SetRotateOrderProcedure::new(*order, *preserve))
            }
            Command::DisableSsc { joints } => {
                Arc::new(DisableSegmentScaleCompensateProcedure::new(joints.clone()))
            }
            Command::SnapJoint {
                target,
                source,
                axes,
            } => Arc::new(SnapJointProcedure::new(target.clone(), source.clone(), *axes)),
        };
        Ok(procedure)
    }
}
