//! Location-tracking walker.
//!
//! A single forward fold over the schedule. The team starts at its home
//! venue; an away game moves it to that game's venue, and any other game
//! sends it back home afterwards. Only away games (and neutral sites under
//! [`NeutralSitePolicy::Travel`]) produce a non-zero leg.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{NeutralSitePolicy, TravelModel};
use crate::error::{Result, TravelError};
use crate::schedule::{Game, HomeAway};
use crate::travel::TravelLeg;
use crate::venue::{Venue, VenueRegistry};

/// A game paired with the leg the team travelled to reach it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLeg {
    pub game: Game,
    pub leg: TravelLeg,
}

/// The team's current physical location during a walk
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPosition<'a> {
    home: &'a Venue,
    current: &'a Venue,
}

impl<'a> TeamPosition<'a> {
    /// Position at the start of a season
    pub fn at_home(home: &'a Venue) -> Self {
        Self {
            home,
            current: home,
        }
    }

    /// Position somewhere other than home, e.g. mid road trip
    pub fn at(home: &'a Venue, current: &'a Venue) -> Self {
        Self { home, current }
    }

    pub fn current(&self) -> &'a Venue {
        self.current
    }

    pub fn home(&self) -> &'a Venue {
        self.home
    }

    pub fn is_home(&self) -> bool {
        self.current.id == self.home.id
    }

    fn return_home(&mut self) {
        self.current = self.home;
    }
}

/// Walk settings borrowed for the duration of one pass
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    pub registry: &'a VenueRegistry,
    pub model: &'a TravelModel,
    pub neutral_site: NeutralSitePolicy,
}

impl<'a> Walker<'a> {
    pub fn new(
        registry: &'a VenueRegistry,
        model: &'a TravelModel,
        neutral_site: NeutralSitePolicy,
    ) -> Self {
        Self {
            registry,
            model,
            neutral_site,
        }
    }

    /// Whether this game's venue must resolve for the walk to proceed
    pub fn needs_venue(&self, game: &Game) -> bool {
        match game.home_away {
            HomeAway::Away => true,
            HomeAway::Neutral => self.neutral_site == NeutralSitePolicy::Travel,
            HomeAway::Home => false,
        }
    }

    /// Resolve a game's venue or fail with the game's position in the schedule
    pub fn resolve(&self, index: usize, game: &Game) -> Result<&'a Venue> {
        self.registry
            .lookup(&game.location)
            .ok_or_else(|| TravelError::UnknownVenue {
                index,
                opponent: game.opponent.clone(),
                location: game.location.clone(),
            })
    }

    /// Advance `position` across one game and return the leg travelled
    pub fn step(
        &self,
        position: &mut TeamPosition<'a>,
        index: usize,
        game: &Game,
    ) -> Result<TravelLeg> {
        let leg = match game.home_away {
            HomeAway::Away => {
                let destination = self.resolve(index, game)?;
                let leg = self.model.leg(position.current, destination);
                position.current = destination;
                leg
            }
            HomeAway::Neutral if self.needs_venue(game) => {
                let destination = self.resolve(index, game)?;
                let leg = self.model.leg(position.current, destination);
                position.return_home();
                leg
            }
            HomeAway::Home | HomeAway::Neutral => {
                position.return_home();
                TravelLeg::HOME
            }
        };

        debug!(
            index,
            opponent = %game.opponent,
            miles = leg.distance_miles,
            hours = leg.duration_hours,
            direction = %leg.direction,
            "leg"
        );
        Ok(leg)
    }

    /// Fold over `games` starting from `start`, returning every leg and the
    /// final position. Nothing is returned if any game fails.
    pub fn walk_from(
        &self,
        start: TeamPosition<'a>,
        games: &[Game],
    ) -> Result<(Vec<GameLeg>, TeamPosition<'a>)> {
        games.iter().enumerate().try_fold(
            (Vec::with_capacity(games.len()), start),
            |(mut legs, mut position), (index, game)| {
                let leg = self.step(&mut position, index, game)?;
                legs.push(GameLeg {
                    game: game.clone(),
                    leg,
                });
                Ok((legs, position))
            },
        )
    }

    /// Walk a whole season from the home venue
    pub fn walk(&self, home: &'a Venue, games: &[Game]) -> Result<Vec<GameLeg>> {
        self.walk_from(TeamPosition::at_home(home), games)
            .map(|(legs, _)| legs)
    }
}

/// Walk `games` with the reference travel model, starting at `home_venue`
pub fn walk(games: &[Game], registry: &VenueRegistry, home_venue: &str) -> Result<Vec<GameLeg>> {
    let home = registry
        .lookup(home_venue)
        .ok_or_else(|| TravelError::UnknownHomeVenue {
            venue: home_venue.to_string(),
        })?;
    let model = TravelModel::default();
    Walker::new(registry, &model, NeutralSitePolicy::AsHome).walk(home, games)
}
