//! Process-wide registry
//!
//! [`GlobalRegistry`] is the `static` form of [`Registry`](crate::Registry):
//! write-once, selected from any context, read lock-free afterwards. The
//! first successful selection wins.
//!
//! ```ignore
//! pub static BSP: GlobalRegistry<SignalId, PeripheralId> = GlobalRegistry::new();
//!
//! BSP.select(&CATALOG, straps.read())?;
//! let reset = BSP.get_signal(SignalId::AmpLeftReset)?;
//! ```

use embassy_sync::once_lock::OnceLock;

use crate::accessor::{BoardAccess, LookupError};
use crate::id::{BoardId, LogicalId};
use crate::mapping::{BoardMapping, Catalog};
use crate::registry::{resolve, BoardIdentity, DetectError, SelectError};

/// Write-once registry for `static` use.
pub struct GlobalRegistry<S: 'static, P: 'static> {
    active: OnceLock<&'static BoardMapping<'static, S, P>>,
}

impl<S: 'static, P: 'static> GlobalRegistry<S, P> {
    /// Unconfigured registry.
    pub const fn new() -> Self {
        Self {
            active: OnceLock::new(),
        }
    }

    /// `true` once a mapping is active.
    pub fn is_configured(&self) -> bool {
        self.active.try_get().is_some()
    }

    fn active_board(&self) -> Option<BoardId> {
        self.active.try_get().map(|m| m.board())
    }
}

impl<S: 'static, P: 'static> Default for GlobalRegistry<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LogicalId, P: LogicalId> GlobalRegistry<S, P> {
    /// Select the catalog's mapping for `board`.
    ///
    /// # Errors
    ///
    /// As [`Registry::select`](crate::Registry::select). A concurrent
    /// selection that lands first turns this one into
    /// [`SelectError::AlreadySelected`].
    pub fn select(
        &self,
        catalog: &Catalog<'static, S, P>,
        board: BoardId,
    ) -> Result<&'static BoardMapping<'static, S, P>, SelectError> {
        let result = self
            .already_selected()
            .and_then(|()| resolve(catalog, board))
            .and_then(|mapping| self.install(mapping));
        match result {
            Ok(mapping) => {
                info!("selected {} ({})", mapping.board(), mapping.name());
                Ok(mapping)
            }
            Err(err) => {
                warn!("board selection rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Read the board id from `detector` and select its mapping.
    ///
    /// # Errors
    ///
    /// [`DetectError::Detection`] if the detector fails, otherwise as
    /// [`GlobalRegistry::select`].
    pub fn select_detected<D: BoardIdentity>(
        &self,
        detector: &mut D,
        catalog: &Catalog<'static, S, P>,
    ) -> Result<&'static BoardMapping<'static, S, P>, DetectError<D::Error>> {
        let board = detector.read_board_id().map_err(DetectError::Detection)?;
        Ok(self.select(catalog, board)?)
    }

    fn already_selected(&self) -> Result<(), SelectError> {
        match self.active_board() {
            Some(active) => Err(SelectError::AlreadySelected { active }),
            None => Ok(()),
        }
    }

    fn install(
        &self,
        mapping: &'static BoardMapping<'static, S, P>,
    ) -> Result<&'static BoardMapping<'static, S, P>, SelectError> {
        match self.active.init(mapping) {
            Ok(()) => Ok(mapping),
            // Lost the race; report whoever won.
            Err(_) => Err(SelectError::AlreadySelected {
                active: self.active_board().unwrap_or(mapping.board()),
            }),
        }
    }
}

impl<S: LogicalId, P: LogicalId> BoardAccess for GlobalRegistry<S, P> {
    type Signal = S;
    type Peripheral = P;

    fn active_mapping(&self) -> Result<&BoardMapping<'_, S, P>, LookupError> {
        self.active
            .try_get()
            .copied()
            .ok_or(LookupError::Unconfigured)
    }
}
