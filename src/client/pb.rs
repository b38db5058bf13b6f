//! Prost/tonic bindings for the `serverProto.SamplingDatabase` service.
//!
//! Maintained by hand against `proto/sampling_api.proto` so the build does
//! not need protoc; the shapes follow tonic's generated client code.

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Point {
    #[prost(double, tag = "1")]
    pub lat: f64,
    #[prost(double, tag = "2")]
    pub lon: f64,
    #[prost(int64, tag = "3")]
    pub time: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct BoundingBox {
    #[prost(message, optional, tag = "1")]
    pub min_point: ::core::option::Option<Point>,
    #[prost(message, optional, tag = "2")]
    pub max_point: ::core::option::Option<Point>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SamplingStructureDescription {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ListStructuresRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListStructuresResponse {
    #[prost(message, repeated, tag = "1")]
    pub structures: ::prost::alloc::vec::Vec<SamplingStructureDescription>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BuildRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub force: bool,
    #[prost(string, tag = "3")]
    pub input_location: ::prost::alloc::string::String,
    #[prost(bool, tag = "4")]
    pub remove_input: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct BuildResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StartQueryRequest {
    #[prost(string, tag = "1")]
    pub structure_name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub query_region: ::core::option::Option<BoundingBox>,
    #[prost(bool, tag = "3")]
    pub return_oid: bool,
    #[prost(bool, tag = "4")]
    pub return_location: bool,
    #[prost(bool, tag = "5")]
    pub return_time: bool,
    #[prost(bool, tag = "6")]
    pub return_payload: bool,
    #[prost(int32, tag = "7")]
    pub suggested_ttl: i32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct StartQueryResponse {
    #[prost(int64, tag = "1")]
    pub query_id: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct QueryRequest {
    #[prost(int64, tag = "1")]
    pub query_id: i64,
    #[prost(int32, tag = "2")]
    pub elements_to_return: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Element {
    #[prost(string, tag = "1")]
    pub oid: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub location: ::core::option::Option<Point>,
    #[prost(string, tag = "3")]
    pub payload: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ElementStatistics {
    #[prost(int64, tag = "1")]
    pub sample_size: i64,
    #[prost(int64, tag = "2")]
    pub total_count: i64,
    #[prost(double, tag = "3")]
    pub mean: f64,
    #[prost(double, tag = "4")]
    pub stdev: f64,
    #[prost(double, tag = "5")]
    pub min: f64,
    #[prost(double, tag = "6")]
    pub max: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryResponse {
    #[prost(message, repeated, tag = "1")]
    pub elements: ::prost::alloc::vec::Vec<Element>,
    #[prost(message, optional, tag = "2")]
    pub lat_last: ::core::option::Option<ElementStatistics>,
    #[prost(message, optional, tag = "3")]
    pub lon_last: ::core::option::Option<ElementStatistics>,
    #[prost(message, optional, tag = "4")]
    pub time_last: ::core::option::Option<ElementStatistics>,
    #[prost(message, optional, tag = "5")]
    pub lat_total: ::core::option::Option<ElementStatistics>,
    #[prost(message, optional, tag = "6")]
    pub lon_total: ::core::option::Option<ElementStatistics>,
    #[prost(message, optional, tag = "7")]
    pub time_total: ::core::option::Option<ElementStatistics>,
    #[prost(int64, tag = "8")]
    pub sample_count_last: i64,
    #[prost(int64, tag = "9")]
    pub sample_count_total: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DropRequest {
    #[prost(string, tag = "1")]
    pub structure_name: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DropResponse {}

/// Client for the SamplingDatabase service.
pub mod sampling_database_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::wildcard_imports)]
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct SamplingDatabaseClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl SamplingDatabaseClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> SamplingDatabaseClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub async fn list_sampling_structure(
            &mut self,
            request: impl tonic::IntoRequest<super::ListStructuresRequest>,
        ) -> std::result::Result<tonic::Response<super::ListStructuresResponse>, tonic::Status>
        {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/serverProto.SamplingDatabase/ListSamplingStructure",
            );
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new(
                "serverProto.SamplingDatabase",
                "ListSamplingStructure",
            ));
            self.inner.unary(req, path, codec).await
        }

        pub async fn build_structure(
            &mut self,
            request: impl tonic::IntoRequest<super::BuildRequest>,
        ) -> std::result::Result<tonic::Response<super::BuildResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/serverProto.SamplingDatabase/BuildStructure",
            );
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new(
                "serverProto.SamplingDatabase",
                "BuildStructure",
            ));
            self.inner.unary(req, path, codec).await
        }

        pub async fn start_query(
            &mut self,
            request: impl tonic::IntoRequest<super::StartQueryRequest>,
        ) -> std::result::Result<tonic::Response<super::StartQueryResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/serverProto.SamplingDatabase/StartQuery",
            );
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new(
                "serverProto.SamplingDatabase",
                "StartQuery",
            ));
            self.inner.unary(req, path, codec).await
        }

        pub async fn query(
            &mut self,
            request: impl tonic::IntoRequest<super::QueryRequest>,
        ) -> std::result::Result<tonic::Response<super::QueryResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/serverProto.SamplingDatabase/Query");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("serverProto.SamplingDatabase", "Query"));
            self.inner.unary(req, path, codec).await
        }

        pub async fn drop_structure(
            &mut self,
            request: impl tonic::IntoRequest<super::DropRequest>,
        ) -> std::result::Result<tonic::Response<super::DropResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/serverProto.SamplingDatabase/DropStructure",
            );
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new(
                "serverProto.SamplingDatabase",
                "DropStructure",
            ));
            self.inner.unary(req, path, codec).await
        }
    }
}
