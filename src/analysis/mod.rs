//! Transcript analysis: finalization, summary/agenda generation, and Q&A
//!
//! Everything here is one primitive — ask the answering service a question
//! about a transcript — applied with different prompts. Summary and agenda
//! run through it at meeting end, ad-hoc questions and action-item
//! extraction run through it afterwards, and all of them share the same
//! error degradation and latency measurement.

mod orchestrator;

pub use orchestrator::{
    MeetingOrchestrator, MeetingWrapUp, QaReply, AGENDA_PROMPT, ACTION_ITEMS_PROMPT,
    SUMMARY_PROMPT,
};
