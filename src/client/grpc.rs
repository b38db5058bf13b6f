//! gRPC implementation of the client binding.

use tonic::transport::Channel;

use super::pb;
use super::pb::sampling_database_client::SamplingDatabaseClient;
use super::{AxisStatistics, BuildSpec, ClientError, Connector, QueryReply, SamplingClient};
use crate::workload::QueryWorkload;

/// Opens one channel per call to `connect`, so every benchmark worker gets
/// an independent connection.
pub struct GrpcConnector {
    endpoint: String,
}

impl GrpcConnector {
    pub fn new(server: &str, port: u16) -> Self {
        Self {
            endpoint: format!("http://{server}:{port}"),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Connector for GrpcConnector {
    async fn connect(&self) -> Result<Box<dyn SamplingClient>, ClientError> {
        let inner = SamplingDatabaseClient::connect(self.endpoint.clone())
            .await
            .map_err(|e| ClientError::Connect {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })?;
        Ok(Box::new(GrpcSamplingClient { inner }))
    }
}

pub struct GrpcSamplingClient {
    inner: SamplingDatabaseClient<Channel>,
}

#[async_trait::async_trait]
impl SamplingClient for GrpcSamplingClient {
    async fn list_structures(&mut self) -> Result<Vec<String>, ClientError> {
        let response = self
            .inner
            .list_sampling_structure(pb::ListStructuresRequest {})
            .await
            .map_err(|s| rpc_error("ListSamplingStructure", s))?;
        Ok(response
            .into_inner()
            .structures
            .into_iter()
            .map(|s| s.name)
            .collect())
    }

    async fn build_structure(&mut self, spec: &BuildSpec) -> Result<(), ClientError> {
        self.inner
            .build_structure(pb::BuildRequest {
                name: spec.name.clone(),
                force: spec.force,
                input_location: spec.input_location.clone(),
                remove_input: spec.remove_input,
            })
            .await
            .map_err(|s| rpc_error("BuildStructure", s))?;
        Ok(())
    }

    async fn start_query(&mut self, workload: &QueryWorkload) -> Result<i64, ClientError> {
        let region = &workload.region;
        let request = pb::StartQueryRequest {
            structure_name: workload.structure_name.clone(),
            query_region: Some(pb::BoundingBox {
                min_point: Some(pb::Point {
                    lat: region.min_lat,
                    lon: region.min_lon,
                    time: region.min_time,
                }),
                max_point: Some(pb::Point {
                    lat: region.max_lat,
                    lon: region.max_lon,
                    time: region.max_time,
                }),
            }),
            return_oid: workload.return_data,
            return_location: workload.return_data,
            return_time: workload.return_data,
            return_payload: workload.return_data,
            suggested_ttl: workload.suggested_ttl,
        };
        let response = self
            .inner
            .start_query(request)
            .await
            .map_err(|s| rpc_error("StartQuery", s))?;
        Ok(response.into_inner().query_id)
    }

    async fn query(
        &mut self,
        query_id: i64,
        elements_to_return: i32,
    ) -> Result<QueryReply, ClientError> {
        let response = self
            .inner
            .query(pb::QueryRequest {
                query_id,
                elements_to_return,
            })
            .await
            .map_err(|s| rpc_error("Query", s))?
            .into_inner();
        Ok(QueryReply {
            element_count: response.elements.len(),
            lat_last: axis_statistics(response.lat_last, "lat_last")?,
            lon_last: axis_statistics(response.lon_last, "lon_last")?,
            time_last: axis_statistics(response.time_last, "time_last")?,
        })
    }

    async fn drop_structure(&mut self, structure_name: &str) -> Result<(), ClientError> {
        self.inner
            .drop_structure(pb::DropRequest {
                structure_name: structure_name.to_string(),
            })
            .await
            .map_err(|s| rpc_error("DropStructure", s))?;
        Ok(())
    }
}

fn rpc_error(method: &'static str, status: tonic::Status) -> ClientError {
    ClientError::Rpc {
        method,
        message: status.to_string(),
    }
}

fn axis_statistics(
    block: Option<pb::ElementStatistics>,
    axis: &str,
) -> Result<AxisStatistics, ClientError> {
    let block = block.ok_or_else(|| ClientError::MalformedResponse {
        method: "Query",
        message: format!("missing {axis} statistics block"),
    })?;
    Ok(AxisStatistics {
        total_count: block.total_count,
        sample_size: block.sample_size,
    })
}
