//! Meeting commands

use std::collections::BTreeSet;

use convene_domain::{
    ConflictResult, ConveneError, MeetingChanges, MeetingDraft, Result, User, UserId,
};

use crate::cli::{CheckArgs, CreateArgs, MeetingsCommand, UpdateArgs};
use crate::context::AppContext;
use crate::output::Outcome;

pub(super) async fn run(ctx: &AppContext, command: MeetingsCommand) -> Result<Outcome> {
    let actor = ctx.current_user().await?;
    let service = &ctx.scheduling;

    let outcome = match command {
        MeetingsCommand::List => Outcome::Meetings(service.list_meetings(&actor).await?),
        MeetingsCommand::Show { id } => Outcome::Meeting(service.get_meeting(&actor, &id).await?),
        MeetingsCommand::Create(args) => {
            Outcome::Meeting(service.create_meeting(&actor, draft(args)?).await?)
        }
        MeetingsCommand::Update(args) => {
            let id = args.id.clone();
            Outcome::Meeting(service.update_meeting(&actor, &id, changes(args)?).await?)
        }
        MeetingsCommand::Cancel { id } => {
            Outcome::Meeting(service.cancel_meeting(&actor, &id).await?)
        }
        MeetingsCommand::Delete { id } => {
            service.delete_meeting(&actor, &id).await?;
            Outcome::done(format!("Deleted meeting {id}."))
        }
        MeetingsCommand::Check(args) => Outcome::Check(check(ctx, &actor, args).await?),
        MeetingsCommand::AddParticipant { id, user_id } => {
            Outcome::Meeting(service.add_participant(&actor, &id, &user_id).await?)
        }
        MeetingsCommand::RemoveParticipant { id, user_id } => {
            Outcome::Meeting(service.remove_participant(&actor, &id, &user_id).await?)
        }
    };

    Ok(outcome)
}

fn participant_set(participants: Vec<UserId>) -> BTreeSet<UserId> {
    participants.into_iter().collect()
}

fn draft(args: CreateArgs) -> Result<MeetingDraft> {
    Ok(MeetingDraft {
        interval: args.slot.required_interval()?,
        title: args.title,
        description: args.description,
        participant_ids: participant_set(args.participants),
    })
}

fn changes(args: UpdateArgs) -> Result<MeetingChanges> {
    let participant_ids =
        (!args.participants.is_empty()).then(|| participant_set(args.participants));

    Ok(MeetingChanges {
        interval: args.slot.interval()?,
        title: args.title,
        description: args.description,
        participant_ids,
    })
}

async fn check(ctx: &AppContext, actor: &User, args: CheckArgs) -> Result<ConflictResult> {
    let interval = args.slot.interval()?;

    let Some(meeting_id) = args.meeting else {
        let draft = MeetingDraft {
            title: "availability check".to_string(),
            description: None,
            participant_ids: participant_set(args.participants),
            interval: interval.ok_or_else(|| {
                ConveneError::Validation(
                    "--start with --end or --minutes is required without --meeting".to_string(),
                )
            })?,
        };
        return ctx.scheduling.check_draft(actor, &draft).await;
    };

    let mut candidate = ctx.scheduling.get_meeting(actor, &meeting_id).await?;
    if let Some(interval) = interval {
        candidate.reschedule(interval)?;
    }
    if !args.participants.is_empty() {
        candidate.participant_ids = participant_set(args.participants);
    }
    ctx.scheduling.check(&candidate).await
}
