//! Idempotency tests for round resolution.
//!
//! These tests verify that asking for a round that already resolved is a
//! no-op (no new records, no changed state), and that replaying the same
//! submissions from the same seed reproduces every record.

#[cfg(test)]
mod tests {
    use crate::games::{Contest, Ultimatum};
    use crate::mocks::{contest_session, rd_session, submit_all, ultimatum_session};
    use crate::{Game, ResolveStatus, Session};
    use econlab_types::games::contest::Effort;
    use econlab_types::games::rd::{Investment, RdConfig};
    use econlab_types::games::ultimatum::UltimatumDecision;
    use econlab_types::{GameError, GroupId, ParticipantId};
    use std::fmt::Debug;

    fn snapshot<G: Game + Debug>(session: &Session<G>) -> String {
        format!("{:?}", session.groups())
    }

    #[test]
    fn test_reresolving_every_past_round_is_noop() {
        let mut session = rd_session(RdConfig::winner_takes_all(false), 2, 17);
        for _ in 0..3 {
            submit_all(&mut session, |participant| Investment((participant.0 % 4) as u8));
            session.resolve_ready().unwrap();
        }
        let before = snapshot(&session);

        for group in 0..2 {
            for round in 1..=3 {
                assert_eq!(
                    session.resolve(GroupId(group), round).unwrap(),
                    ResolveStatus::AlreadyResolved
                );
            }
        }
        assert_eq!(snapshot(&session), before);
        assert_eq!(session.groups()[0].current_round(), 4);
    }

    #[test]
    fn test_resolve_ready_without_submissions_is_noop() {
        let mut session = contest_session(2, 8);
        let before = snapshot(&session);
        assert!(session.resolve_ready().unwrap().is_empty());
        assert_eq!(snapshot(&session), before);
    }

    #[test]
    fn test_completed_session_rejects_further_work() {
        let mut session = contest_session(1, 8);
        for _ in 0..2 {
            submit_all(&mut session, |_| Effort(1));
            session.resolve_ready().unwrap();
        }
        assert!(session.is_complete());
        assert!(session.resolve_ready().unwrap().is_empty());
        assert_eq!(
            session.submit(ParticipantId(0), Effort(0)),
            Err(GameError::SessionComplete { last: 2 })
        );
        assert_eq!(
            session.resolve(GroupId(0), 2).unwrap(),
            ResolveStatus::AlreadyResolved
        );
    }

    #[test]
    fn test_replay_from_seed_matches() {
        let play = || -> Session<Contest> {
            let mut session = contest_session(3, 21);
            submit_all(&mut session, |participant| Effort(participant.0 % 3));
            session.resolve_ready().unwrap();
            submit_all(&mut session, |participant| Effort(2 - participant.0 % 3));
            session.resolve_ready().unwrap();
            session
        };
        assert_eq!(snapshot(&play()), snapshot(&play()));
    }

    #[test]
    fn test_finished_negotiation_resolves_once_per_round() {
        let mut session: Session<Ultimatum> = ultimatum_session(1);
        session
            .submit(ParticipantId(0), UltimatumDecision::Propose(400))
            .unwrap();
        session
            .submit(ParticipantId(1), UltimatumDecision::Respond { accept: true })
            .unwrap();
        session.resolve(GroupId(0), 1).unwrap();

        // Round 2 awaits nobody: the first call records it, the second does not.
        assert_eq!(
            session.resolve(GroupId(0), 2).unwrap(),
            ResolveStatus::Resolved
        );
        let before = snapshot(&session);
        assert_eq!(
            session.resolve(GroupId(0), 2).unwrap(),
            ResolveStatus::AlreadyResolved
        );
        assert_eq!(snapshot(&session), before);
        assert_eq!(session.groups()[0].completed_rounds(), 2);
    }

    #[test]
    fn test_cloned_session_resolves_identically() {
        let mut original = rd_session(RdConfig::spillover(true), 1, 2);
        submit_all(&mut original, |_| Investment(5));
        let mut copy = original.clone();
        original.resolve_ready().unwrap();
        copy.resolve_ready().unwrap();
        assert_eq!(snapshot(&original), snapshot(&copy));
    }
}
