//! Command dispatcher.
//!
//! Turns one list of tokens into exactly one gateway call and renders the
//! outcome as text. The dispatcher keeps nothing between invocations; every
//! [`Shell::run`] starts from scratch.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{self, Write};
use std::num::ParseIntError;

use device_policy_sdk::{
    CreateUserFlags, DevicePolicyError, DevicePolicyGatewayClient, SerialNumber, WipeFlags,
    or_null,
};
use thiserror::Error;
use tracing::{debug, error, info};

const ARG_FLAGS: &str = "--flags";

/// Commands understood by the shell, in usage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    CreateUser,
    RemoveUser,
    IsUserAffiliated,
    SetAffiliationIds,
    GetAffiliationIds,
    ListUserRestrictions,
    SetUserRestriction,
    LockNow,
    WipeData,
    RequestBugreport,
    SetNetworkLogging,
}

impl Command {
    pub const ALL: [Self; 12] = [
        Self::Help,
        Self::CreateUser,
        Self::RemoveUser,
        Self::IsUserAffiliated,
        Self::SetAffiliationIds,
        Self::GetAffiliationIds,
        Self::ListUserRestrictions,
        Self::SetUserRestriction,
        Self::LockNow,
        Self::WipeData,
        Self::RequestBugreport,
        Self::SetNetworkLogging,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::CreateUser => "create-user",
            Self::RemoveUser => "remove-user",
            Self::IsUserAffiliated => "is-user-affiliated",
            Self::SetAffiliationIds => "set-affiliation-ids",
            Self::GetAffiliationIds => "get-affiliation-ids",
            Self::ListUserRestrictions => "list-user-restrictions",
            Self::SetUserRestriction => "set-user-restriction",
            Self::LockNow => "lock-now",
            Self::WipeData => "wipe-data",
            Self::RequestBugreport => "request-bugreport",
            Self::SetNetworkLogging => "set-network-logging",
        }
    }

    /// Argument synopsis and description shown by `help`.
    const fn synopsis(self) -> &'static str {
        match self {
            Self::Help => " - show this help",
            Self::CreateUser => {
                " [--flags FLAGS] [NAME] - create a user with the optional flags and name"
            }
            Self::RemoveUser => " <USER_SERIAL_NUMBER> - remove the given user",
            Self::IsUserAffiliated => " - checks if the user is affiliated with the device",
            Self::SetAffiliationIds => concat!(
                " [ID1] [ID2] [IDN] - sets the user affiliation ids",
                " (or clear them if no ids is passed)"
            ),
            Self::GetAffiliationIds => " - gets the user affiliation ids",
            Self::ListUserRestrictions => " - list the user restrictions",
            Self::SetUserRestriction => {
                " <RESTRICTION> <true|false> - set the given user restriction"
            }
            Self::LockNow => " - lock the device (now! :-)",
            Self::WipeData => " - factory reset the device",
            Self::RequestBugreport => " - request a bugreport",
            Self::SetNetworkLogging => " <true|false> - enable / disable network logging",
        }
    }

    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == token)
    }
}

/// Malformed command arguments.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("missing argument {0}")]
    Missing(&'static str),

    #[error("invalid {name} '{value}'")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Positional view over the tokens following the command name.
struct Args<'t> {
    tokens: &'t [String],
}

impl<'t> Args<'t> {
    fn get(&self, index: usize) -> Option<&'t str> {
        self.tokens.get(index).map(String::as_str)
    }

    fn required(&self, index: usize, name: &'static str) -> Result<&'t str, ArgumentError> {
        self.get(index).ok_or(ArgumentError::Missing(name))
    }

    fn number<N>(&self, index: usize, name: &'static str) -> Result<N, ArgumentError>
    where
        N: std::str::FromStr<Err = ParseIntError>,
    {
        let value = self.required(index, name)?;
        value.parse().map_err(|source| ArgumentError::InvalidNumber {
            name,
            value: value.to_owned(),
            source,
        })
    }

    fn flag(&self, index: usize, name: &'static str) -> Result<bool, ArgumentError> {
        self.required(index, name).map(parse_bool)
    }

    fn rest(&self, from: usize) -> &'t [String] {
        self.tokens.get(from..).unwrap_or_default()
    }
}

/// `true` in any case is true; anything else is false.
#[must_use]
pub fn parse_bool(token: &str) -> bool {
    token.eq_ignore_ascii_case("true")
}

/// One-shot dispatcher writing to `out`.
pub struct Shell<'a, W> {
    gateway: &'a dyn DevicePolicyGatewayClient,
    out: W,
}

impl<'a, W: Write> Shell<'a, W> {
    #[must_use]
    pub fn new(gateway: &'a dyn DevicePolicyGatewayClient, out: W) -> Self {
        Self { gateway, out }
    }

    /// Consumes the shell and returns the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs the command named by the first token.
    ///
    /// Gateway failures and malformed arguments are rendered, never returned.
    ///
    /// # Errors
    ///
    /// Returns an error only when writing to the sink fails.
    pub fn run(&mut self, tokens: &[String]) -> io::Result<()> {
        debug!(args = %tokens.join(" "), "Dispatching shell command");

        let Some(first) = tokens.first() else {
            return self.show_usage();
        };
        let Some(command) = Command::parse(first) else {
            write!(self.out, "Invalid command: {first}\n\n")?;
            return self.show_usage();
        };
        let args = Args {
            tokens: &tokens[1..],
        };
        match self.execute(command, &args) {
            Ok(()) => Ok(()),
            Err(e) => match e.downcast::<io::Error>() {
                Ok(io) => Err(io),
                Err(e) => {
                    let detail = format!("{e:#}");
                    self.fail(format_args!("error executing [{}]", tokens.join(", ")), &detail)
                }
            },
        }
    }

    fn execute(&mut self, command: Command, args: &Args<'_>) -> anyhow::Result<()> {
        match command {
            Command::Help => self.show_usage()?,
            Command::CreateUser => self.create_user(args)?,
            Command::RemoveUser => self.remove_user(args)?,
            Command::IsUserAffiliated => {
                let affiliated = self.gateway.is_affiliated_user()?;
                writeln!(self.out, "{affiliated}")?;
            }
            Command::SetAffiliationIds => self.set_affiliation_ids(args)?,
            Command::GetAffiliationIds => self.print_affiliation_ids()?,
            Command::ListUserRestrictions => {
                info!("Listing user restrictions");
                let restrictions = self.gateway.user_restrictions()?;
                self.print_collection("user restrictions", &restrictions)?;
            }
            Command::SetUserRestriction => self.set_user_restriction(args)?,
            Command::LockNow => {
                info!("Locking device");
                let outcome = self.gateway.lock_now(None).map(|()| "Device locked".to_owned());
                self.report(outcome, "Error locking device")?;
            }
            Command::WipeData => {
                info!("Wiping data");
                let outcome = self
                    .gateway
                    .wipe_data(WipeFlags::default())
                    .map(|()| "Data wiped".to_owned());
                self.report(outcome, "Error wiping data")?;
            }
            Command::RequestBugreport => {
                info!("Requesting bugreport");
                let outcome = self
                    .gateway
                    .request_bugreport()
                    .map(|()| "Bugreport requested".to_owned());
                self.report(outcome, "Error requesting bugreport")?;
            }
            Command::SetNetworkLogging => {
                let enabled = args.flag(0, "<true|false>")?;
                info!(enabled, "Setting network logging");
                let outcome = self
                    .gateway
                    .set_network_logging(enabled)
                    .map(|()| format!("Network logging set to {enabled}"));
                self.report(outcome, format_args!("Error setting network logging to {enabled}"))?;
            }
        }
        Ok(())
    }

    fn create_user(&mut self, args: &Args<'_>) -> anyhow::Result<()> {
        let (flags, name) = if args.get(0) == Some(ARG_FLAGS) {
            let bits: u32 = args.number(1, "flags")?;
            (CreateUserFlags::from_bits_retain(bits), args.get(2))
        } else {
            (CreateUserFlags::default(), args.get(0))
        };
        let shown = or_null(name);
        info!(name = shown, %flags, "Creating user");

        let outcome = self
            .gateway
            .create_and_manage_user(name, flags)
            .map(|user| format!("User created: {user}"));
        self.report(outcome, format_args!("Error creating user {shown}"))?;
        Ok(())
    }

    fn remove_user(&mut self, args: &Args<'_>) -> anyhow::Result<()> {
        let serial = SerialNumber::new(args.number(0, "serial number")?);
        info!(%serial, "Removing user");

        let outcome = self
            .gateway
            .remove_user_by_serial(serial)
            .map(|()| format!("User {serial} removed"));
        self.report(outcome, format_args!("Error removing user {serial}"))?;
        Ok(())
    }

    fn set_affiliation_ids(&mut self, args: &Args<'_>) -> anyhow::Result<()> {
        let ids: BTreeSet<String> = args.rest(0).iter().cloned().collect();
        info!(count = ids.len(), "Setting affiliation ids");
        self.gateway.set_affiliation_ids(&ids)?;
        self.print_affiliation_ids()
    }

    fn print_affiliation_ids(&mut self) -> anyhow::Result<()> {
        let ids = self.gateway.affiliation_ids()?;
        if ids.is_empty() {
            writeln!(self.out, "no affiliation ids")?;
        } else {
            let joined: Vec<&str> = ids.iter().map(String::as_str).collect();
            writeln!(self.out, "{} affiliation ids: [{}]", ids.len(), joined.join(", "))?;
        }
        Ok(())
    }

    fn set_user_restriction(&mut self, args: &Args<'_>) -> anyhow::Result<()> {
        let key = args.required(0, "<RESTRICTION>")?;
        let enabled = args.flag(1, "<true|false>")?;
        info!(restriction = key, enabled, "Setting user restriction");

        let outcome = self
            .gateway
            .set_user_restriction(key, enabled)
            .map(|()| format!("User restriction '{key}' set to {enabled}"));
        self.report(
            outcome,
            format_args!("Error setting user restriction '{key}' to {enabled}"),
        )?;
        Ok(())
    }

    fn show_usage(&mut self) -> io::Result<()> {
        write!(self.out, "Usage:\n\n")?;
        for command in Command::ALL {
            writeln!(self.out, "\t{}{}", command.name(), command.synopsis())?;
        }
        Ok(())
    }

    fn print_collection(&mut self, what: &str, items: &BTreeSet<String>) -> io::Result<()> {
        if items.is_empty() {
            return writeln!(self.out, "No {what}");
        }
        writeln!(self.out, "{} {what}:", items.len())?;
        for item in items {
            writeln!(self.out, "  {item}")?;
        }
        Ok(())
    }

    /// Renders a gateway outcome as one line.
    fn report(
        &mut self,
        outcome: Result<String, DevicePolicyError>,
        failure: impl Display,
    ) -> io::Result<()> {
        match outcome {
            Ok(message) => {
                info!("{message}");
                writeln!(self.out, "{message}")
            }
            Err(e) => self.fail(failure, &e),
        }
    }

    fn fail(&mut self, message: impl Display, detail: &dyn Display) -> io::Result<()> {
        error!(error = %detail, "{message}");
        writeln!(self.out, "{message}: {detail}")
    }
}
