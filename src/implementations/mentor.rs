use std::sync::Arc;

use log::info;

use crate::config::MentorOptions;
use crate::implementations::capabilities::{ CollaborativeCapability, SingleModelCapability };
use crate::implementations::config::MentorConfig;
use crate::implementations::gateway::Gateway;
use crate::implementations::notes_pipeline::NotesPipeline;
use crate::implementations::pacing::FixedDelayPacer;
use crate::implementations::stage_pipeline::StagePipeline;
use crate::models::common::{ CapabilityId, Provider };
use crate::models::notes::{ CodeExplanation, ExampleTrace, FINALIZED_NOTES_SCHEMA };
use crate::models::schema::ResponseSchema;
use crate::models::solution::{
    ApproachProposal,
    BasicSolution,
    CodeDraft,
    VerifiedCode,
    TEST_OUTPUT_SCHEMA,
};
use crate::traits::invocable::Invocable;
use crate::traits::model_backend::ModelBackend;
use crate::traits::pacer::Pacer;

/// Provider and reply shape for every single-model capability
fn default_binding(id: CapabilityId) -> (Provider, ResponseSchema) {
    match id {
        CapabilityId::ProblemAnalyzer => (Provider::Gemini, BasicSolution::SCHEMA),
        CapabilityId::BruteForceApproach => (Provider::Groq, ApproachProposal::SCHEMA),
        CapabilityId::BruteForceCoder => (Provider::Gemini, CodeDraft::SCHEMA),
        CapabilityId::SubOptimalApproach => (Provider::Groq, ApproachProposal::SCHEMA),
        CapabilityId::SubOptimalCoder => (Provider::Gemini, CodeDraft::SCHEMA),
        CapabilityId::OptimalApproach => (Provider::Groq, ApproachProposal::SCHEMA),
        CapabilityId::OptimalCoder => (Provider::Gemini, CodeDraft::SCHEMA),
        CapabilityId::CodeRunner => (Provider::Gemini, TEST_OUTPUT_SCHEMA),
        CapabilityId::CodeVerifier => (Provider::Groq, VerifiedCode::SCHEMA),
        CapabilityId::NotesExplainer => (Provider::Gemini, CodeExplanation::SCHEMA),
        CapabilityId::NotesTracer => (Provider::Gemini, ExampleTrace::SCHEMA),
        CapabilityId::NotesFinalizer => (Provider::Gemini, FINALIZED_NOTES_SCHEMA),
    }
}

fn single(
    config: &MentorConfig,
    backend: &Arc<dyn ModelBackend>,
    id: CapabilityId
) -> SingleModelCapability {
    let (provider, schema) = default_binding(id);
    let mut capability = SingleModelCapability::new(
        id,
        config.model(provider),
        schema,
        Arc::clone(backend)
    );
    if let Some(instructions) = config.instructions_for(id) {
        capability = capability.with_instructions(instructions);
    }
    if let Some(template) = config.get_template("capability") {
        capability = capability.with_template(template);
    }
    capability
}

/// Register the default capability set on a fresh gateway
pub fn build_gateway(config: &MentorConfig, backend: Arc<dyn ModelBackend>) -> Gateway {
    let mut gateway = Gateway::new(config.options().retry);

    let approach: Arc<dyn Invocable> = Arc::new(
        single(config, &backend, CapabilityId::BruteForceApproach)
    );
    let coder: Arc<dyn Invocable> = Arc::new(single(config, &backend, CapabilityId::BruteForceCoder));
    let coordinator: Arc<dyn Invocable> = Arc::new(
        single(config, &backend, CapabilityId::ProblemAnalyzer)
    );
    gateway.register(
        Arc::new(
            CollaborativeCapability::new(
                CapabilityId::ProblemAnalyzer,
                vec![approach, coder],
                coordinator
            )
        )
    );

    for id in CapabilityId::ALL {
        if matches!(
            id,
            CapabilityId::ProblemAnalyzer |
                CapabilityId::BruteForceApproach |
                CapabilityId::BruteForceCoder
        ) {
            continue;
        }
        gateway.register(Arc::new(single(config, &backend, id)));
    }

    gateway
}

/// The two pipelines sharing one gateway and pacer
pub struct Mentor {
    pub stages: StagePipeline,
    pub notes: NotesPipeline,
}

impl Mentor {
    pub fn new(gateway: Gateway, pacer: Arc<dyn Pacer>, options: MentorOptions) -> Self {
        let gateway = Arc::new(gateway);
        Self {
            stages: StagePipeline::new(Arc::clone(&gateway), Arc::clone(&pacer), options),
            notes: NotesPipeline::new(gateway, pacer),
        }
    }

    /// Default wiring over the given model backend
    pub fn from_config(config: &MentorConfig, backend: Arc<dyn ModelBackend>) -> Self {
        let options = config.options();
        info!(
            "Using {} and {} (pacing {:?}, {} attempts per call)",
            config.model(Provider::Groq),
            config.model(Provider::Gemini),
            options.pacing_delay,
            options.retry.max_attempts
        );
        let pacer: Arc<dyn Pacer> = Arc::new(FixedDelayPacer(options.pacing_delay));
        Self::new(build_gateway(config, backend), pacer, options)
    }
}
