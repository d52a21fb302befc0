//! The product-wide `BSP` registry. One test function: `BSP` is a process
//! global and selection is write-once.

#![allow(clippy::unwrap_used)]

use soul_board::{BoardAccess, BoardId, LookupError, SelectError, SignalId, BSP, CATALOG};

#[test]
fn bsp_is_unconfigured_until_selected_then_fixed() {
    assert!(!BSP.is_configured());
    assert_eq!(BSP.get_signal(SignalId::AmpLeftReset), Err(LookupError::Unconfigured));

    assert_eq!(
        BSP.select(&CATALOG, BoardId::new(9)).err(),
        Some(SelectError::UnknownBoard(BoardId::new(9)))
    );
    assert!(!BSP.is_configured());

    let mapping = BSP.select(&CATALOG, BoardId::new(1)).unwrap();
    assert_eq!(mapping.name(), "evt1");
    assert_eq!(
        BSP.select(&CATALOG, BoardId::new(0)).err(),
        Some(SelectError::AlreadySelected {
            active: BoardId::new(1)
        })
    );

    let cs = BSP.get_signal(SignalId::MotorDriverCs).unwrap();
    assert_eq!(cs.pin().get(), 22);
    assert_eq!(BSP.get_signal(SignalId::DebugUartTx), Err(LookupError::NotFound));
}
