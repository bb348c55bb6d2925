// src/commands.rs
use chrono::Utc;

use crate::domain::resolve::resolve_end_time;
use crate::domain::{Auction, Errors};
use crate::persistence::AuctionStore;
use crate::scheduler::{RescheduleHandle, SharedState};

/// A command as exposed on the chat surface.
pub struct Command {
    pub admin: bool,
    pub name: &'static str,
}

pub const COMMANDS: &[Command] = &[
    Command {
        admin: false,
        name: "help",
    },
    Command {
        admin: false,
        name: "getauctioninfo",
    },
    Command {
        admin: true,
        name: "setauctioninfo",
    },
    Command {
        admin: true,
        name: "editauctioninfo",
    },
];

pub struct CommandContext<'a> {
    pub state: &'a SharedState,
    pub store: &'a dyn AuctionStore,
    pub reschedule: &'a RescheduleHandle,
    pub admin: bool,
}

/// Route a command by name. Admin commands are invisible to non-admins.
pub async fn dispatch(
    ctx: &CommandContext<'_>,
    command: &str,
    args: &str,
) -> Result<String, Errors> {
    match command {
        "help" => Ok(help_text(ctx.admin)),
        "getauctioninfo" => get_auction_info(ctx),
        "setauctioninfo" if ctx.admin => set_auction_info(ctx, args).await,
        "editauctioninfo" if ctx.admin => edit_auction_info(ctx, args).await,
        _ => Err(Errors::UnknownCommand(command.to_string())),
    }
}

fn help_text(admin: bool) -> String {
    if admin {
        "/help - this text\n\
         /getauctioninfo - returns info of current auction\n\
         /setauctioninfo [end_time] - set details for the next auction\n\
         /editauctioninfo [end_time] - change the end of the current auction"
            .to_string()
    } else {
        "/help - this text\n\
         /getauctioninfo - returns info of current auction"
            .to_string()
    }
}

fn get_auction_info(ctx: &CommandContext<'_>) -> Result<String, Errors> {
    let state = ctx.state.lock().unwrap();
    match &state.current_auction {
        Some(auction) => match auction.end_time {
            Some(end) => Ok(format!("Auction end time: {}", end)),
            None => Ok("An auction exists but no end time is set".to_string()),
        },
        None => Err(Errors::NoCurrentAuction),
    }
}

async fn set_auction_info(ctx: &CommandContext<'_>, args: &str) -> Result<String, Errors> {
    // Built off to the side and committed only after a successful save, so
    // a failed write leaves shared state untouched.
    let mut auction = {
        let state = ctx.state.lock().unwrap();
        if let Some(end) = state.current_auction.as_ref().and_then(|a| a.end_time) {
            return Err(Errors::AuctionAlreadyScheduled(end));
        }
        // No auction record yet means we start a fresh one.
        state.current_auction.clone().unwrap_or_else(Auction::new)
    };

    let end = resolve_end_time(args, Utc::now())?;
    auction.end_time = Some(end);
    ctx.store.save(&auction)?;
    ctx.state.lock().unwrap().current_auction = Some(auction);
    ctx.reschedule.request_reschedule().await;
    Ok(format!("Auction scheduled to end at {}", end))
}

async fn edit_auction_info(ctx: &CommandContext<'_>, args: &str) -> Result<String, Errors> {
    let mut auction = {
        let state = ctx.state.lock().unwrap();
        match &state.current_auction {
            Some(auction) => auction.clone(),
            None => return Err(Errors::NoCurrentAuction),
        }
    };

    let end = resolve_end_time(args, Utc::now())?;
    auction.end_time = Some(end);
    ctx.store.save(&auction)?;
    ctx.state.lock().unwrap().current_auction = Some(auction);
    ctx.reschedule.request_reschedule().await;
    Ok("Auction updated!".to_string())
}
