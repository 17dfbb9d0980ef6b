use borsh::{BorshDeserialize, BorshSerialize};

use crate::{Constraint, decode_constraint, encode_constraint};

impl BorshSerialize for Constraint {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let bytes = encode_constraint(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        bytes.serialize(writer)
    }
}

impl BorshDeserialize for Constraint {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let bytes = Vec::<u8>::deserialize_reader(reader)?;
        decode_constraint(&bytes).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
