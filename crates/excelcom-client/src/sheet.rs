//! One worksheet on the bridge, as a grid backend.

use std::io::{BufRead, Write};

use excelcom_core::{CellHandle, FindQuery, GridBackend, RawGridValue, SearchDirection};
use excelcom_protocol::SheetRef;

use crate::client::{BridgeClient, ClientError};

/// A handle to one worksheet reached through a [`BridgeClient`].
///
/// Every grid call is forwarded to the bridge with this handle's sheet.
pub struct SheetBackend<'a, R, W> {
    client: &'a mut BridgeClient<R, W>,
    sheet: SheetRef,
}

impl<'a, R: BufRead, W: Write> SheetBackend<'a, R, W> {
    pub(crate) fn new(client: &'a mut BridgeClient<R, W>, sheet: SheetRef) -> Self {
        Self { client, sheet }
    }

    pub fn sheet(&self) -> &SheetRef {
        &self.sheet
    }
}

impl<R: BufRead, W: Write> GridBackend for SheetBackend<'_, R, W> {
    type Error = ClientError;

    fn get_matrix_value(&mut self, address: &str) -> Result<RawGridValue, ClientError> {
        self.client.get_range_value(self.sheet.clone(), address)
    }

    fn set_matrix_value(&mut self, address: &str, value: RawGridValue) -> Result<(), ClientError> {
        self.client.set_range_value(self.sheet.clone(), address, value)
    }

    fn step_find(&mut self, query: &FindQuery) -> Result<Option<CellHandle>, ClientError> {
        self.client.find(self.sheet.clone(), query)
    }

    fn step_find_next(
        &mut self,
        range: &str,
        previous: &CellHandle,
        direction: SearchDirection,
    ) -> Result<CellHandle, ClientError> {
        self.client
            .find_next(self.sheet.clone(), range, previous.position, direction)
    }
}
