//! Load levels from line-oriented text files
//!
//! ```text
//! # comment
//! META TARGET <int>
//! META SPEED <float>
//! <TypeChar> <x> <y> [<w> <h> <value> <subtype> <speed>]
//! ```
//!
//! Loading replaces the whole world: entities are cleared first, then each
//! record is spawned and given the payload its kind calls for. A record whose
//! optional fields stop parsing part way keeps what was read and defaults
//! the rest. Lines without a readable type, `x` and `y` are reported and
//! skipped; they never abort the load.

use crate::core::types::{Direction, EntityKind};
use crate::entity::payload::{ActorData, EnemyData, Payload, PickupData};
use crate::world::state::WorldState;
use glam::Vec2;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{satisfy, space0, space1};
use nom::combinator::{eof, map};
use nom::number::complete::float;
use nom::sequence::preceded;
use nom::{IResult, Parser};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Authoring value used when a record omits it
pub const DEFAULT_VALUE: i32 = 10;
/// Authoring subtype used when a record omits it (right-facing)
pub const DEFAULT_SUBTYPE: i32 = 1;
/// Authoring speed used when a record omits it
pub const DEFAULT_SPEED: f32 = 0.0;

/// Errors that abort reading a level file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single line was skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("malformed entity record")]
    MalformedRecord,
    #[error("unrecognised or malformed META directive")]
    MalformedMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub error: LineError,
}

/// What a load produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelSummary {
    pub spawned: usize,
    /// Records whose spawn was refused because the registry was full
    pub dropped: usize,
    /// Records with an unrecognised type character, spawned inert
    pub inert: usize,
    /// Records spawned with unreadable trailing text ignored
    pub partial: usize,
    pub skipped: Vec<SkippedLine>,
    pub target_score: i32,
    pub base_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Directive {
    Target(i32),
    Speed(f32),
}

/// One entity line; trailing fields the author left out are `None`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Record {
    type_char: char,
    x: f32,
    y: f32,
    width: Option<f32>,
    height: Option<f32>,
    value: Option<i32>,
    subtype: Option<i32>,
    speed: Option<f32>,
}

fn int_field(input: &str) -> IResult<&str, i32> {
    preceded(space1, nom::character::complete::i32).parse(input)
}

fn float_field(input: &str) -> IResult<&str, f32> {
    preceded(space1, float).parse(input)
}

fn directive(input: &str) -> IResult<&str, Directive> {
    let (input, _) = (tag("META"), space1).parse(input)?;
    let (input, directive) = alt((
        map(
            preceded((tag("TARGET"), space1), nom::character::complete::i32),
            Directive::Target,
        ),
        map(preceded((tag("SPEED"), space1), float), Directive::Speed),
    ))
    .parse(input)?;
    let (input, _) = (space0, eof).parse(input)?;
    Ok((input, directive))
}

/// Run `parser` unless an earlier optional field already failed
///
/// A failure ends the optional run: this and every later field stay `None`
/// and `rest` keeps pointing at the text that could not be read.
fn trailing<'a, T>(
    rest: &mut &'a str,
    stopped: &mut bool,
    parser: fn(&'a str) -> IResult<&'a str, T>,
) -> Option<T> {
    if *stopped {
        return None;
    }
    match parser(rest) {
        Ok((remaining, value)) => {
            *rest = remaining;
            Some(value)
        }
        Err(_) => {
            *stopped = true;
            None
        }
    }
}

/// Parse an entity record; the remaining input is text no field accepted
///
/// Only the type character, `x` and `y` are required. Optional fields are
/// read left to right up to the first one that does not parse; it and the
/// fields after it fall back to their defaults.
fn record(input: &str) -> IResult<&str, Record> {
    let (input, type_char) = satisfy(|c: char| !c.is_whitespace()).parse(input)?;
    let (input, x) = float_field(input)?;
    let (input, y) = float_field(input)?;

    let mut rest = input;
    let mut stopped = false;
    let width = trailing(&mut rest, &mut stopped, float_field);
    let height = trailing(&mut rest, &mut stopped, float_field);
    let value = trailing(&mut rest, &mut stopped, int_field);
    let subtype = trailing(&mut rest, &mut stopped, int_field);
    let speed = trailing(&mut rest, &mut stopped, float_field);

    Ok((
        rest.trim(),
        Record {
            type_char,
            x,
            y,
            width,
            height,
            value,
            subtype,
            speed,
        },
    ))
}

enum Line<'a> {
    Blank,
    Meta(Directive),
    Entity {
        record: Record,
        /// Trailing text past the last readable field
        ignored: &'a str,
    },
}

fn parse_line(raw: &str) -> Result<Line<'_>, LineError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Blank);
    }

    if line.split_whitespace().next() == Some("META") {
        return match directive(line) {
            Ok((_, Directive::Speed(speed))) if speed.is_nan() || speed <= 0.0 => {
                Err(LineError::MalformedMeta)
            }
            Ok((_, d)) => Ok(Line::Meta(d)),
            Err(_) => Err(LineError::MalformedMeta),
        };
    }

    record(line)
        .map(|(ignored, record)| Line::Entity { record, ignored })
        .map_err(|_| LineError::MalformedRecord)
}

/// Payload an entity of `kind` starts with, built from its authoring slots
fn build_payload(
    kind: EntityKind,
    position: Vec2,
    value: i32,
    subtype: i32,
    speed: f32,
) -> Option<Payload> {
    match kind {
        EntityKind::Actor => Some(Payload::Actor(
            ActorData::new(position).with_direction(Direction::from_subtype(subtype)),
        )),
        EntityKind::PickupConsumable | EntityKind::PickupCurrency => {
            Some(Payload::Pickup(PickupData { value }))
        }
        // Patrols start up for subtype 0 and right for anything else
        EntityKind::Enemy => {
            let direction = if subtype == 0 {
                Direction::Up
            } else {
                Direction::Right
            };
            Some(Payload::Enemy(EnemyData::new(direction, speed)))
        }
        EntityKind::Wall | EntityKind::None => None,
    }
}

/// Clear the world and restore default level metadata
fn reset_world(world: &mut WorldState) {
    world.entities.clear();
    world.events.clear();
    world.game_over = false;
    world.level_loaded = false;
    world.reset_level_metadata();
}

fn spawn_record(world: &mut WorldState, record: &Record, summary: &mut LevelSummary) {
    let cell = world.config().cell_size;
    let kind = EntityKind::from_type_char(record.type_char);
    let position = Vec2::new(record.x, record.y);
    let size = Vec2::new(record.width.unwrap_or(cell), record.height.unwrap_or(cell));
    let value = record.value.unwrap_or(DEFAULT_VALUE);
    let subtype = record.subtype.unwrap_or(DEFAULT_SUBTYPE);
    let speed = record.speed.unwrap_or(DEFAULT_SPEED);

    let Ok(index) = world.entities.spawn(kind, position, size) else {
        summary.dropped += 1;
        return;
    };
    let Some(entity) = world.entities.get_mut(index) else {
        return;
    };

    entity.property_value = value;
    entity.property_subtype = subtype;
    entity.property_speed = speed;

    if let Some(payload) = build_payload(kind, position, value, subtype, speed) {
        if let Err(err) = entity.attach_payload(payload) {
            tracing::warn!("Entity {:?} spawned without payload: {}", entity.id, err);
        }
    }

    if kind == EntityKind::None {
        summary.inert += 1;
    }
    summary.spawned += 1;
}

/// Replace the world with the level described by `content`
pub fn load_level_from_str(world: &mut WorldState, content: &str) -> LevelSummary {
    reset_world(world);

    let mut summary = LevelSummary::default();

    for (i, raw) in content.lines().enumerate() {
        let line_number = i + 1;
        match parse_line(raw) {
            Ok(Line::Blank) => {}
            Ok(Line::Meta(Directive::Target(target))) => world.level_target_score = target,
            Ok(Line::Meta(Directive::Speed(speed))) => world.level_base_speed = speed,
            Ok(Line::Entity { record, ignored }) => {
                if !ignored.is_empty() {
                    summary.partial += 1;
                    tracing::warn!(
                        "Line {}: unreadable field {:?}, remaining fields defaulted",
                        line_number,
                        ignored
                    );
                }
                if EntityKind::from_type_char(record.type_char) == EntityKind::None {
                    tracing::warn!(
                        "Line {}: unknown type '{}', spawned as inert placeholder",
                        line_number,
                        record.type_char
                    );
                }
                spawn_record(world, &record, &mut summary);
            }
            Err(error) => {
                tracing::warn!("Line {}: {} skipped: {:?}", line_number, error, raw.trim());
                summary.skipped.push(SkippedLine {
                    line: line_number,
                    error,
                });
            }
        }
    }

    if summary.dropped > 0 {
        tracing::warn!(
            "Entity registry full: {} records dropped (capacity {})",
            summary.dropped,
            world.entities.capacity()
        );
    }

    world.level_loaded = true;
    summary.target_score = world.level_target_score;
    summary.base_speed = world.level_base_speed;
    summary
}

/// Replace the world with the level stored at `path`
///
/// On a read failure the world is still cleared, with default metadata and
/// no entities, and the error is returned for the caller to report.
pub fn load_level(world: &mut WorldState, path: &Path) -> Result<LevelSummary, LoadError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            reset_world(world);
            tracing::warn!("Failed to load {}: {}", path.display(), source);
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let summary = load_level_from_str(world, &content);
    tracing::info!(
        "Level loaded from {}. Target: {}, Speed: {:.2}, Entities: {}",
        path.display(),
        summary.target_score,
        summary.base_speed,
        summary.spawned
    );
    Ok(summary)
}
