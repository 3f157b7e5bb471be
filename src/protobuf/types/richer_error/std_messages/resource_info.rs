use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used to encode/decode the `ResourceInfo` standard error message described
/// in [error_details.proto]. Describes the resource that is being accessed.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceInfo {
    /// Type of resource being accessed.
    pub resource_type: String,

    /// Name of the resource being accessed.
    pub resource_name: String,

    /// The owner of the resource (optional).
    pub owner: String,

    /// Describes the error encountered when accessing the resource.
    pub description: String,
}

impl ResourceInfo {
    /// Type URL of the `ResourceInfo` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.ResourceInfo";

    /// Creates a new [`ResourceInfo`] struct.
    pub fn new(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        owner: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_name: resource_name.into(),
            owner: owner.into(),
            description: description.into(),
        }
    }

    /// Returns `true` if every [`ResourceInfo`] field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource_type.is_empty()
            && self.resource_name.is_empty()
            && self.owner.is_empty()
            && self.description.is_empty()
    }
}

impl From<pb::ResourceInfo> for ResourceInfo {
    fn from(res_info: pb::ResourceInfo) -> Self {
        Self {
            resource_type: res_info.resource_type,
            resource_name: res_info.resource_name,
            owner: res_info.owner,
            description: res_info.description,
        }
    }
}

impl From<ResourceInfo> for pb::ResourceInfo {
    fn from(res_info: ResourceInfo) -> Self {
        Self {
            resource_type: res_info.resource_type,
            resource_name: res_info.resource_name,
            owner: res_info.owner,
            description: res_info.description,
        }
    }
}

impl IntoAny for ResourceInfo {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::ResourceInfo::from(self))
    }
}

impl FromAnyRef for ResourceInfo {
    const TYPE_URL: &'static str = ResourceInfo::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::ResourceInfo>(any).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_resource_info() {
        let res_info = ResourceInfo::new("disk", "Disk23", "ops", "quota reached");
        let decoded = ResourceInfo::from_any_ref(&res_info.clone().into_any()).unwrap();

        assert_eq!(decoded, res_info);
        assert!(!decoded.is_empty());
    }
}
