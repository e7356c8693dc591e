#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skirmish_core::actions::{ActionRequest, ATTACK_ACTION};
    use skirmish_core::commands::AgentCommand;
    use skirmish_core::enums::{CombatState, CombatStyle, GoalStatus, Skill, WeaponCategory};
    use skirmish_core::goal::GoalSpec;
    use skirmish_core::snapshot::{Candidate, LocalActor, WorldSnapshot};
    use skirmish_core::types::{Position, SkillLevels};

    use skirmish_ai::selector::SelectionCriteria;

    use crate::combat::{CombatConfig, CombatStateMachine};
    use crate::engine::{AgentEngine, EngineConfig};
    use crate::runner::{run_cycles, ActionExecutor, WorldProvider};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn goblin(id: u32, x: f64) -> Candidate {
        Candidate {
            id,
            name: "Goblin".to_string(),
            position: Position::new(x, 0.0),
            health_pct: 100.0,
            level: 5,
            in_combat: false,
            on_screen: true,
            attackable: true,
        }
    }

    fn snapshot(now_ms: u64, candidates: Vec<Candidate>) -> WorldSnapshot {
        WorldSnapshot {
            now_ms,
            local: LocalActor {
                position: Position::new(0.0, 0.0),
                health_pct: 100.0,
                in_combat: false,
                weapon_category: WeaponCategory::Melee,
                skills: SkillLevels::new().with(Skill::Attack, 1),
            },
            candidates,
        }
    }

    fn is_attack(request: &ActionRequest, id: u32) -> bool {
        matches!(
            request,
            ActionRequest::Interact { target_id, action }
                if *target_id == id && action == ATTACK_ACTION
        )
    }

    // ---- Combat state machine ----

    #[test]
    fn test_acquisition_attacks_and_engages() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let snap = snapshot(0, vec![goblin(7, 3.0)]);

        let outcome = fsm.step(&snap, &criteria, &mut rng());
        assert_eq!(outcome.actions.len(), 1);
        assert!(is_attack(&outcome.actions[0], 7));
        assert_eq!(fsm.state(), CombatState::Engaging);
        assert_eq!(fsm.session().target_id(), Some(7));
        assert!((600..=1_000).contains(&outcome.delay_ms));
    }

    #[test]
    fn test_no_target_goes_idle() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let snap = snapshot(0, vec![]);

        let outcome = fsm.step(&snap, &criteria, &mut rng());
        assert!(outcome.actions.is_empty());
        assert_eq!(fsm.state(), CombatState::Idle);
        assert!((1_000..=2_000).contains(&outcome.delay_ms));
    }

    #[test]
    fn test_observed_combat_confirms_fighting() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);

        let mut engaged = goblin(7, 3.0);
        engaged.in_combat = true;
        let outcome = fsm.step(&snapshot(1_000, vec![engaged]), &criteria, &mut rng);
        assert!(outcome.actions.is_empty());
        assert_eq!(fsm.state(), CombatState::Fighting);
        assert_eq!(fsm.session().consecutive_misses(), 0);
    }

    #[test]
    fn test_miss_counter_disengages_at_threshold() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);

        // Neither side ever shows a combat flag; the fifth observation
        // disengages without kill credit.
        for miss in 1..=4u64 {
            fsm.step(&snapshot(miss * 1_000, vec![goblin(7, 3.0)]), &criteria, &mut rng);
            assert_eq!(fsm.state(), CombatState::Engaging);
        }
        fsm.step(&snapshot(5_000, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        assert_eq!(fsm.state(), CombatState::Disengaging);
        assert_eq!(fsm.session().target_id(), None);
        assert_eq!(fsm.session().kills(), 0);
    }

    #[test]
    fn test_miss_counter_resets_on_observed_combat() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        fsm.step(&snapshot(1_000, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        assert_eq!(fsm.session().consecutive_misses(), 1);

        let mut engaged = goblin(7, 3.0);
        engaged.in_combat = true;
        fsm.step(&snapshot(2_000, vec![engaged]), &criteria, &mut rng);
        assert_eq!(fsm.session().consecutive_misses(), 0);
        assert_eq!(fsm.state(), CombatState::Fighting);
    }

    /// An engagement with no attack for over ten seconds times out, even
    /// while the target still reads as fighting.
    #[test]
    fn test_engagement_timeout_disengages_without_kill() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);

        let mut engaged = goblin(7, 3.0);
        engaged.in_combat = true;
        let outcome = fsm.step(&snapshot(11_000, vec![engaged]), &criteria, &mut rng);
        assert!(outcome.actions.is_empty());
        assert_eq!(fsm.state(), CombatState::Disengaging);
        assert_eq!(fsm.session().kills(), 0);
        assert!((500..=800).contains(&outcome.delay_ms));
    }

    #[test]
    fn test_kill_credited_only_on_observed_death() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        let mut dead = goblin(7, 3.0);
        dead.health_pct = 0.0;
        fsm.step(&snapshot(1_000, vec![dead]), &criteria, &mut rng);
        assert_eq!(fsm.session().kills(), 1);
        assert_eq!(fsm.state(), CombatState::Disengaging);
    }

    #[test]
    fn test_vanished_target_gets_no_kill_credit() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        fsm.step(&snapshot(1_000, vec![]), &criteria, &mut rng);
        assert_eq!(fsm.session().kills(), 0);
        assert_eq!(fsm.state(), CombatState::Disengaging);
        assert_eq!(fsm.session().target_id(), None);
    }

    #[test]
    fn test_recovery_preempts_engagement() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);

        let mut snap = snapshot(1_000, vec![goblin(7, 3.0)]);
        snap.local.health_pct = 15.0;
        let outcome = fsm.step(&snap, &criteria, &mut rng);
        assert_eq!(outcome.actions, vec![ActionRequest::ConsumeRecoveryItem]);
        assert_eq!(fsm.state(), CombatState::Recovering);
        // The engagement survives recovery; eating is not an attack.
        assert_eq!(fsm.session().target_id(), Some(7));
        assert!((800..=1_200).contains(&outcome.delay_ms));
    }

    #[test]
    fn test_disengage_then_reacquires_next_cycle() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        let mut dead = goblin(7, 3.0);
        dead.health_pct = 0.0;
        // Second goblin also present while the first dies.
        fsm.step(&snapshot(1_000, vec![dead, goblin(8, 4.0)]), &criteria, &mut rng);
        assert_eq!(fsm.state(), CombatState::Disengaging);

        let outcome = fsm.step(&snapshot(2_000, vec![goblin(8, 4.0)]), &criteria, &mut rng);
        assert!(is_attack(&outcome.actions[0], 8));
        assert_eq!(fsm.state(), CombatState::Engaging);
    }

    #[test]
    fn test_custom_miss_threshold() {
        let mut fsm = CombatStateMachine::new(CombatConfig {
            max_misses: 2,
            ..Default::default()
        });
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        fsm.step(&snapshot(1_000, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        assert_eq!(fsm.state(), CombatState::Engaging);
        fsm.step(&snapshot(2_000, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        assert_eq!(fsm.state(), CombatState::Disengaging);
    }

    #[test]
    fn test_kills_per_hour_math() {
        let mut fsm = CombatStateMachine::default();
        let criteria = SelectionCriteria::new();
        let mut rng = rng();

        fsm.step(&snapshot(0, vec![goblin(7, 3.0)]), &criteria, &mut rng);
        let mut dead = goblin(7, 3.0);
        dead.health_pct = 0.0;
        fsm.step(&snapshot(1_000, vec![dead]), &criteria, &mut rng);

        // One kill in half an hour extrapolates to two per hour.
        let per_hour = fsm.session().kills_per_hour(1_800_000);
        assert!((per_hour - 2.0).abs() < 1e-9);
        assert_eq!(fsm.session().kills_per_hour(0), 0.0);
    }

    // ---- Engine ----

    fn goal_spec(target_level: u32, style: Option<CombatStyle>) -> GoalSpec {
        GoalSpec::simple("attack training", "Goblin", Skill::Attack, target_level, style, 0)
    }

    #[test]
    fn test_engine_idle_until_started() {
        let mut engine = AgentEngine::default();
        let outcome = engine.cycle(&snapshot(0, vec![goblin(7, 3.0)]));
        assert!(outcome.actions.is_empty());
        assert!(!outcome.status.running);
    }

    #[test]
    fn test_start_goal_activation_and_attack() {
        let mut engine = AgentEngine::default();
        engine.queue_commands([
            AgentCommand::Start,
            AgentCommand::QueueGoal {
                spec: goal_spec(10, Some(CombatStyle::Accurate)),
            },
        ]);

        // An imp sits closer than the goblin; the goal's allow-list must
        // exclude it from targeting.
        let mut imp = goblin(9, 1.0);
        imp.name = "Imp".to_string();
        let outcome = engine.cycle(&snapshot(0, vec![imp, goblin(7, 3.0)]));

        assert!(outcome
            .actions
            .contains(&ActionRequest::ChangeCombatStyle {
                style: CombatStyle::Accurate,
            }));
        assert!(outcome.actions.iter().any(|a| is_attack(a, 7)));
        assert!(outcome.status.running);
        assert_eq!(outcome.status.combat_state, CombatState::Engaging);
        assert_eq!(outcome.status.current_target, Some(7));

        let goal = outcome.status.current_goal.expect("goal should be active");
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(goal.progress_pct, 0.0);
    }

    #[test]
    fn test_goal_completion_reflected_in_status() {
        let mut engine = AgentEngine::default();
        engine.queue_commands([
            AgentCommand::Start,
            AgentCommand::QueueGoal {
                spec: goal_spec(2, None),
            },
        ]);
        engine.cycle(&snapshot(0, vec![goblin(7, 3.0)]));

        let mut snap = snapshot(1_000, vec![goblin(7, 3.0)]);
        snap.local.skills = SkillLevels::new().with(Skill::Attack, 2);
        let outcome = engine.cycle(&snap);

        assert_eq!(outcome.status.completed_goals, 1);
        assert!(outcome.status.current_goal.is_none());
    }

    #[test]
    fn test_stop_cancels_goal_and_resets_combat() {
        let mut engine = AgentEngine::default();
        engine.queue_commands([
            AgentCommand::Start,
            AgentCommand::QueueGoal {
                spec: goal_spec(10, None),
            },
        ]);
        engine.cycle(&snapshot(0, vec![goblin(7, 3.0)]));

        engine.queue_command(AgentCommand::Stop);
        let outcome = engine.cycle(&snapshot(1_000, vec![goblin(7, 3.0)]));
        assert!(!outcome.status.running);
        assert!(outcome.actions.is_empty());
        assert_eq!(outcome.status.current_target, None);
        assert_eq!(outcome.status.combat_state, CombatState::Idle);
        assert!(outcome.status.current_goal.is_none());
    }

    #[test]
    fn test_malformed_snapshot_backs_off() {
        let mut engine = AgentEngine::default();
        engine.queue_command(AgentCommand::Start);

        let mut snap = snapshot(0, vec![goblin(7, 3.0)]);
        snap.local.health_pct = f64::NAN;
        let outcome = engine.cycle(&snap);
        assert!(outcome.actions.is_empty());
        assert!((1_000..=2_000).contains(&outcome.sleep_hint_ms));

        // A sane snapshot afterwards resumes normally.
        let outcome = engine.cycle(&snapshot(1_500, vec![goblin(7, 3.0)]));
        assert!(outcome.actions.iter().any(|a| is_attack(a, 7)));
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let config = || EngineConfig {
            seed: 99,
            ..Default::default()
        };
        let mut a = AgentEngine::new(config());
        let mut b = AgentEngine::new(config());
        for engine in [&mut a, &mut b] {
            engine.queue_commands([
                AgentCommand::Start,
                AgentCommand::QueueGoal {
                    spec: goal_spec(10, None),
                },
            ]);
        }

        for cycle in 0..200u64 {
            let snap = snapshot(cycle * 800, vec![goblin(7, 3.0), goblin(8, 5.0)]);
            assert_eq!(a.cycle(&snap), b.cycle(&snap), "diverged at cycle {cycle}");
        }
    }

    #[test]
    fn test_fail_current_goal_command() {
        let mut engine = AgentEngine::default();
        engine.queue_commands([
            AgentCommand::Start,
            AgentCommand::QueueGoal {
                spec: goal_spec(10, None),
            },
        ]);
        engine.cycle(&snapshot(0, vec![goblin(7, 3.0)]));

        engine.queue_command(AgentCommand::FailCurrentGoal {
            reason: "area exhausted".to_string(),
        });
        let outcome = engine.cycle(&snapshot(1_000, vec![goblin(7, 3.0)]));
        assert!(outcome.status.current_goal.is_none());
        assert_eq!(outcome.status.completed_goals, 0);
    }

    #[test]
    fn test_status_serializes() {
        let mut engine = AgentEngine::default();
        engine.queue_command(AgentCommand::Start);
        let outcome = engine.cycle(&snapshot(0, vec![goblin(7, 3.0)]));

        let json = serde_json::to_string(&outcome.status).unwrap();
        let back: skirmish_core::status::AgentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome.status);
    }

    // ---- Runner ----

    struct ScriptedWorld {
        frames: Vec<WorldSnapshot>,
        cursor: usize,
    }

    impl WorldProvider for ScriptedWorld {
        fn poll(&mut self) -> WorldSnapshot {
            let frame = self.frames[self.cursor.min(self.frames.len() - 1)].clone();
            self.cursor += 1;
            frame
        }
    }

    #[derive(Default)]
    struct RecordingExecutor {
        requests: Vec<ActionRequest>,
    }

    impl ActionExecutor for RecordingExecutor {
        fn dispatch(&mut self, request: &ActionRequest) {
            self.requests.push(request.clone());
        }
    }

    #[test]
    fn test_run_cycles_dispatches_actions() {
        let mut engine = AgentEngine::default();
        engine.queue_commands([
            AgentCommand::Start,
            AgentCommand::QueueGoal {
                spec: goal_spec(10, None),
            },
        ]);

        let mut world = ScriptedWorld {
            frames: vec![
                snapshot(0, vec![goblin(7, 3.0)]),
                snapshot(800, vec![goblin(7, 3.0)]),
            ],
            cursor: 0,
        };
        let mut executor = RecordingExecutor::default();

        let outcomes = run_cycles(&mut engine, &mut world, &mut executor, 2);
        assert_eq!(outcomes.len(), 2);
        assert!(executor.requests.iter().any(|a| is_attack(a, 7)));
        assert!(outcomes.iter().all(|o| o.status.running));
    }
}
