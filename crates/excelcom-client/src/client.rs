//! Request/response exchange with the bridge.

use std::io::{BufRead, Write};

use excelcom_core::{CellHandle, CellPosition, FindQuery, RawGridValue, SearchDirection, Worksheet};
use excelcom_protocol::{
    from_line, to_line, Command as BridgeCommand, Request, Response, ResponseData, ResponseResult,
    SheetRef,
};
use tracing::{debug, trace, warn};

use crate::sheet::SheetBackend;

/// Errors from the bridge client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("I/O error on bridge transport: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bridge closed the connection")]
    Closed,

    #[error("Bridge returned error: {0}")]
    Remote(String),

    #[error("Unexpected response data for {0}")]
    UnexpectedResponse(&'static str),

    #[error("Response id {got} does not match request id {expected}")]
    IdMismatch { expected: u64, got: u64 },
}

/// Configuration for a [`BridgeClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Sheet used by [`BridgeClient::worksheet`]. Defaults to index 0.
    pub sheet: SheetRef,

    /// Id of the first request. Defaults to 1.
    pub first_id: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sheet: SheetRef::default(),
            first_id: 1,
        }
    }
}

impl ClientConfig {
    pub fn sheet(mut self, sheet: impl Into<SheetRef>) -> Self {
        self.sheet = sheet.into();
        self
    }
}

/// A connection to the bridge.
///
/// Requests are strictly sequential: every call writes one line and blocks
/// until the matching response line arrives.
pub struct BridgeClient<R, W> {
    reader: R,
    writer: W,
    next_id: u64,
    config: ClientConfig,
}

impl<R: BufRead, W: Write> BridgeClient<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_config(reader, writer, ClientConfig::default())
    }

    pub fn with_config(reader: R, writer: W, config: ClientConfig) -> Self {
        Self {
            reader,
            writer,
            next_id: config.first_id,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Give back the transport halves
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// A grid backend bound to one sheet
    pub fn sheet(&mut self, sheet: impl Into<SheetRef>) -> SheetBackend<'_, R, W> {
        SheetBackend::new(self, sheet.into())
    }

    /// A worksheet on the configured default sheet
    pub fn worksheet(&mut self) -> Worksheet<SheetBackend<'_, R, W>> {
        let sheet = self.config.sheet.clone();
        Worksheet::new(SheetBackend::new(self, sheet))
    }

    /// Send a command to the bridge and wait for the response.
    pub fn send_command(
        &mut self,
        command: BridgeCommand,
    ) -> Result<Option<ResponseData>, ClientError> {
        let id = self.next_id;
        self.next_id += 1;

        let name = command.name();
        let line = to_line(&Request { id, command })?;
        trace!(id, cmd = name, line = line.trim_end(), "request");

        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ClientError::Closed);
        }
        trace!(id, line = line.trim_end(), "response");

        let response: Response = from_line(&line)?;
        if response.id != id {
            warn!(expected = id, got = response.id, cmd = name, "response id mismatch");
            return Err(ClientError::IdMismatch {
                expected: id,
                got: response.id,
            });
        }

        match response.result {
            ResponseResult::Ok { data } => Ok(data),
            ResponseResult::Error { message } => {
                debug!(id, cmd = name, %message, "bridge error");
                Err(ClientError::Remote(message))
            }
        }
    }

    pub fn get_range_value(
        &mut self,
        sheet: SheetRef,
        range: &str,
    ) -> Result<RawGridValue, ClientError> {
        let data = self.send_command(BridgeCommand::GetRangeValue {
            sheet,
            range: range.to_string(),
        })?;
        match data {
            Some(ResponseData::Value { value }) => Ok(value),
            _ => Err(ClientError::UnexpectedResponse("GetRangeValue")),
        }
    }

    pub fn set_range_value(
        &mut self,
        sheet: SheetRef,
        range: &str,
        value: RawGridValue,
    ) -> Result<(), ClientError> {
        self.send_command(BridgeCommand::SetRangeValue {
            sheet,
            range: range.to_string(),
            value,
        })?;
        Ok(())
    }

    pub fn find(
        &mut self,
        sheet: SheetRef,
        query: &FindQuery,
    ) -> Result<Option<CellHandle>, ClientError> {
        let data = self.send_command(BridgeCommand::Find {
            sheet,
            query: query.clone(),
        })?;
        match data {
            Some(ResponseData::Match { cell }) => Ok(cell),
            _ => Err(ClientError::UnexpectedResponse("Find")),
        }
    }

    /// Continue the last search after `after`.
    ///
    /// The bridge always answers with a cell here; an empty match is reported
    /// as an unexpected response.
    pub fn find_next(
        &mut self,
        sheet: SheetRef,
        range: &str,
        after: CellPosition,
        direction: SearchDirection,
    ) -> Result<CellHandle, ClientError> {
        let data = self.send_command(BridgeCommand::FindNext {
            sheet,
            range: range.to_string(),
            after,
            direction,
        })?;
        match data {
            Some(ResponseData::Match { cell: Some(cell) }) => Ok(cell),
            _ => Err(ClientError::UnexpectedResponse("FindNext")),
        }
    }
}
