use std::collections::VecDeque;

use super::event::{TaskEvent, TelemetryEvent};
use crate::kernel::intent::IntentRoute;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub turn_stats: TurnStats,
    pub task_stats: TaskStats,
    pub routing_stats: RoutingStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnStats {
    pub states_entered: u64,
    pub ignored_events: u64,
    pub no_inputs: u64,
    pub out_of_grammar: u64,
    pub reprompts: u64,
    pub max_consecutive_reprompts: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStats {
    pub started: u64,
    pub completed: u64,
    pub restarted: u64,
    pub abandoned: u64,
    /// completed / started, 0.0 when nothing started.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutingStats {
    pub who_is_x: u64,
    pub create_meeting: u64,
    pub unknown: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::StateEntered { .. } => snap.turn_stats.states_entered += 1,
            TelemetryEvent::EventIgnored { .. } => snap.turn_stats.ignored_events += 1,
            TelemetryEvent::NoInput { .. } => snap.turn_stats.no_inputs += 1,
            TelemetryEvent::OutOfGrammar { .. } => snap.turn_stats.out_of_grammar += 1,
            TelemetryEvent::Reprompt { count, .. } => {
                snap.turn_stats.reprompts += 1;
                snap.turn_stats.max_consecutive_reprompts =
                    snap.turn_stats.max_consecutive_reprompts.max(*count);
            }
            TelemetryEvent::IntentRouted { route } => match route {
                IntentRoute::WhoIsX => snap.routing_stats.who_is_x += 1,
                IntentRoute::CreateMeeting => snap.routing_stats.create_meeting += 1,
                IntentRoute::Unknown => snap.routing_stats.unknown += 1,
            },
            TelemetryEvent::Task(task) => match task {
                TaskEvent::Started(_) => snap.task_stats.started += 1,
                TaskEvent::Completed(_) => snap.task_stats.completed += 1,
                TaskEvent::Restarted(_) => snap.task_stats.restarted += 1,
                TaskEvent::Abandoned(_) => snap.task_stats.abandoned += 1,
            },
        }
    }

    if snap.task_stats.started > 0 {
        snap.task_stats.completion_rate =
            snap.task_stats.completed as f64 / snap.task_stats.started as f64;
    }

    snap
}
