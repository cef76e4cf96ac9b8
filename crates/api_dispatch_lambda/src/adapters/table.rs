use api_dispatch_core::remote::{ScanOutput, TableItem, TableService, TableValue};
use api_dispatch_core::RemoteError;
use aws_sdk_dynamodb::types::AttributeValue;

use super::{block_on, remote_error, AwsServices};

fn table_value(value: &AttributeValue) -> TableValue {
    match value {
        AttributeValue::S(text) => TableValue::S(text.clone()),
        AttributeValue::N(number) => TableValue::N(number.clone()),
        AttributeValue::Bool(flag) => TableValue::Bool(*flag),
        _ => TableValue::Other,
    }
}

impl TableService for AwsServices {
    fn scan(&self, table: &str) -> Result<ScanOutput, RemoteError> {
        let output = block_on(async { self.dynamodb.scan().table_name(table).send().await })
            .map_err(remote_error)?;

        let items = output
            .items()
            .iter()
            .map(|item| {
                item.iter()
                    .map(|(name, value)| (name.clone(), table_value(value)))
                    .collect::<TableItem>()
            })
            .collect();

        Ok(ScanOutput {
            count: usize::try_from(output.count()).unwrap_or_default(),
            items,
        })
    }
}
