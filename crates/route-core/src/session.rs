//! Edit-session state machine.
//!
//! `Idle -> Drawing -> Editing -> Idle`. Starting an edit creates a fresh
//! [`EditSession`]; the first finished draw moves it to `Editing` and enables
//! export; stopping discards the session together with its route. Every
//! geometry change runs the point diff, realigns the descriptions and
//! re-renders the segment table.

use crate::annotations::Annotations;
use crate::coords::CoordFormatter;
use crate::diff::diff_points;
use crate::export::{export_route, ExportContext, ExportFile, ExportFormat};
use crate::metrics::{DisplayModel, SegmentRenderer};
use crate::models::{CoordStyle, DistanceUnit, Point, TableLabels};
use crate::picker::{LabelPicker, OpenPicker, PickerError};
use crate::projection::Projection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Idle,
    Drawing,
    Editing,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditMode::Idle => "idle",
            EditMode::Drawing => "drawing",
            EditMode::Editing => "editing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no edit session is active")]
    NotActive,

    #[error("an edit session is already active")]
    AlreadyActive,

    #[error("'{event}' is not valid while {mode}")]
    InvalidTransition { event: &'static str, mode: EditMode },

    #[error("export is only available after the first finished draw")]
    ExportDisabled,

    #[error("route has no segment {0}")]
    NoSuchSegment(usize),

    #[error(transparent)]
    Picker(#[from] PickerError),
}

/// Input to the controller, as emitted by the map surface or the route panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditEvent {
    StartEdit,
    StopEdit,
    DrawStart,
    DrawEnd { points: Vec<Point> },
    ModifyStart,
    ModifyEnd { points: Vec<Point> },
    GeometryChanged { points: Vec<Point> },
    SetDescription { index: usize, text: String },
    SetDistanceUnit { unit: DistanceUnit },
    SetCoordStyle { style: CoordStyle },
}

impl EditEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EditEvent::StartEdit => "start_edit",
            EditEvent::StopEdit => "stop_edit",
            EditEvent::DrawStart => "draw_start",
            EditEvent::DrawEnd { .. } => "draw_end",
            EditEvent::ModifyStart => "modify_start",
            EditEvent::ModifyEnd { .. } => "modify_end",
            EditEvent::GeometryChanged { .. } => "geometry_changed",
            EditEvent::SetDescription { .. } => "set_description",
            EditEvent::SetDistanceUnit { .. } => "set_distance_unit",
            EditEvent::SetCoordStyle { .. } => "set_coord_style",
        }
    }
}

/// State owned by one edit, from "start edit" to "stop edit".
#[derive(Debug, Clone)]
pub struct EditSession {
    pub mode: EditMode,
    /// Last seen route, also the snapshot the next change is diffed against
    pub points: Vec<Point>,
    pub annotations: Annotations,
    pub export_enabled: bool,
    pub picker: LabelPicker,
    pub started_at: DateTime<Utc>,
    pub model: DisplayModel,
}

impl EditSession {
    fn new(unit: DistanceUnit) -> Self {
        Self {
            mode: EditMode::Drawing,
            points: Vec::new(),
            annotations: Annotations::new(),
            export_enabled: false,
            picker: LabelPicker::new(),
            started_at: Utc::now(),
            model: DisplayModel {
                unit,
                ..DisplayModel::default()
            },
        }
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub mode: EditMode,
    pub points: Vec<Point>,
    pub annotations: Vec<String>,
    pub unit: DistanceUnit,
    pub coord_style: CoordStyle,
    pub export_enabled: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub picker: Option<OpenPicker>,
    pub model: DisplayModel,
}

/// The controller. Owns the session and the display settings.
pub struct RouteEditor {
    projection: Box<dyn Projection>,
    formatter: Box<dyn CoordFormatter>,
    labels: TableLabels,
    unit: DistanceUnit,
    coord_style: CoordStyle,
    session: Option<EditSession>,
}

impl RouteEditor {
    pub fn new(projection: Box<dyn Projection>, formatter: Box<dyn CoordFormatter>) -> Self {
        Self {
            projection,
            formatter,
            labels: TableLabels::default(),
            unit: DistanceUnit::default(),
            coord_style: CoordStyle::default(),
            session: None,
        }
    }

    pub fn with_labels(mut self, labels: TableLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_coord_style(mut self, style: CoordStyle) -> Self {
        self.coord_style = style;
        self
    }

    pub fn mode(&self) -> EditMode {
        self.session.as_ref().map(|s| s.mode).unwrap_or_default()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn labels(&self) -> &TableLabels {
        &self.labels
    }

    /// Apply one event. Returns the new display model when the table changed.
    pub fn handle(&mut self, event: EditEvent) -> Result<Option<DisplayModel>, SessionError> {
        let name = event.name();
        tracing::debug!("Edit event {} while {}", name, self.mode());

        match event {
            EditEvent::StartEdit => {
                if self.session.is_some() {
                    return Err(SessionError::AlreadyActive);
                }
                let session = EditSession::new(self.unit);
                tracing::info!("Edit session started at {}", session.started_at);
                let model = session.model.clone();
                self.session = Some(session);
                Ok(Some(model))
            }
            EditEvent::StopEdit => {
                let session = self.session.take().ok_or(SessionError::NotActive)?;
                tracing::info!(
                    "Edit session stopped with {} points after {}s",
                    session.points.len(),
                    (Utc::now() - session.started_at).num_seconds()
                );
                Ok(Some(DisplayModel {
                    unit: self.unit,
                    ..DisplayModel::default()
                }))
            }
            EditEvent::DrawStart => {
                self.require(name, &[EditMode::Drawing])?;
                Ok(None)
            }
            EditEvent::DrawEnd { points } => {
                self.require(name, &[EditMode::Drawing])?;
                if let Some(session) = self.session.as_mut() {
                    session.mode = EditMode::Editing;
                    session.export_enabled = true;
                }
                tracing::info!("Route drawn with {} points", points.len());
                self.update(points).map(Some)
            }
            EditEvent::ModifyStart => {
                self.require(name, &[EditMode::Editing])?;
                Ok(None)
            }
            EditEvent::ModifyEnd { points } => {
                self.require(name, &[EditMode::Editing])?;
                self.update(points).map(Some)
            }
            EditEvent::GeometryChanged { points } => {
                self.require(name, &[EditMode::Drawing, EditMode::Editing])?;
                self.update(points).map(Some)
            }
            EditEvent::SetDescription { index, text } => {
                self.set_description(index, text).map(Some)
            }
            EditEvent::SetDistanceUnit { unit } => {
                self.unit = unit;
                self.refresh_if_active()
            }
            EditEvent::SetCoordStyle { style } => {
                self.coord_style = style;
                self.refresh_if_active()
            }
        }
    }

    /// Export the current route. Requires a finished draw.
    pub fn export(&self, format: ExportFormat, trip_name: &str) -> Result<ExportFile, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NotActive)?;
        if !session.export_enabled {
            return Err(SessionError::ExportDisabled);
        }

        let ctx = ExportContext {
            projection: self.projection.as_ref(),
            formatter: self.formatter.as_ref(),
            coord_style: self.coord_style,
            labels: &self.labels,
        };
        Ok(export_route(
            format,
            &session.points,
            session.annotations.as_slice(),
            trip_name,
            &ctx,
        ))
    }

    /// WGS84 `(lat, lon)` used to look up labels for `desc_<index>`: the
    /// arrival point of that segment.
    pub fn picker_target_position(&self, index: usize) -> Result<(f64, f64), SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NotActive)?;
        let point = session
            .points
            .get(index + 1)
            .copied()
            .ok_or(SessionError::NoSuchSegment(index))?;
        let (lon, lat) = self.projection.to_lon_lat(point);
        Ok((lat, lon))
    }

    /// Fails if no session is active or a picker is already showing.
    pub fn ensure_picker_available(&self) -> Result<(), SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NotActive)?;
        session.picker.ensure_closed()?;
        Ok(())
    }

    pub fn open_picker(&mut self, index: usize, options: Option<Vec<String>>) -> Result<OpenPicker, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        if index >= session.segment_count() {
            return Err(SessionError::NoSuchSegment(index));
        }
        Ok(session.picker.open(index, options)?.clone())
    }

    /// Write the chosen label into its description and re-render.
    pub fn confirm_picker(&mut self, label: &str) -> Result<DisplayModel, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        let (target, label) = session.picker.confirm(label)?;
        tracing::info!("Label picked for desc_{}: {}", target, label);
        self.set_description(target, label)
    }

    pub fn cancel_picker(&mut self) -> Result<Option<OpenPicker>, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        Ok(session.picker.cancel())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.as_ref();
        SessionSnapshot {
            mode: self.mode(),
            points: session.map(|s| s.points.clone()).unwrap_or_default(),
            annotations: session
                .map(|s| s.annotations.as_slice().to_vec())
                .unwrap_or_default(),
            unit: self.unit,
            coord_style: self.coord_style,
            export_enabled: session.is_some_and(|s| s.export_enabled),
            started_at: session.map(|s| s.started_at),
            picker: session.and_then(|s| s.picker.current().cloned()),
            model: session.map(|s| s.model.clone()).unwrap_or_else(|| DisplayModel {
                unit: self.unit,
                ..DisplayModel::default()
            }),
        }
    }

    fn require(&self, event: &'static str, allowed: &[EditMode]) -> Result<(), SessionError> {
        let mode = self.mode();
        if mode == EditMode::Idle {
            return Err(SessionError::NotActive);
        }
        if !allowed.contains(&mode) {
            return Err(SessionError::InvalidTransition { event, mode });
        }
        Ok(())
    }

    fn update(&mut self, points: Vec<Point>) -> Result<DisplayModel, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        let diff = diff_points(&session.points, &points);
        tracing::debug!(
            "Route changed {} -> {} points: {:?} at {:?}",
            session.points.len(),
            points.len(),
            diff.kind,
            diff.index
        );
        session.annotations.apply(diff, points.len().saturating_sub(1));
        session.points = points;
        self.refresh()
    }

    fn set_description(&mut self, index: usize, text: String) -> Result<DisplayModel, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        if index >= session.segment_count() {
            return Err(SessionError::NoSuchSegment(index));
        }
        session.annotations.set(index, text);
        self.refresh()
    }

    fn refresh_if_active(&mut self) -> Result<Option<DisplayModel>, SessionError> {
        if self.session.is_none() {
            return Ok(None);
        }
        self.refresh().map(Some)
    }

    fn refresh(&mut self) -> Result<DisplayModel, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NotActive)?;
        let model = SegmentRenderer::new(self.projection.as_ref(), self.formatter.as_ref()).render(
            &session.points,
            session.annotations.as_slice(),
            self.unit,
            self.coord_style,
        );
        if let Some(session) = self.session.as_mut() {
            session.model = model.clone();
        }
        Ok(model)
    }
}
