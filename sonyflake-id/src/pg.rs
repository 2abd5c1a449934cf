use bytes::{BytesMut, BufMut};
use postgres_types::{to_sql_checked, accepts, IsNull, FromSql, ToSql, Type as PgType};

use crate::Flake;

fn read_i64(bytes: &[u8]) -> Option<i64> {
    let array: [u8; 8] = bytes.try_into().ok()?;

    Some(i64::from_be_bytes(array))
}

impl<'a> FromSql<'a> for Flake {
    fn from_sql(
        _: &PgType,
        raw: &'a [u8]
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        let Some(int) = read_i64(raw) else {
            return Err("invalid buffer size".into());
        };

        Flake::try_from(int).map_err(Into::into)
    }

    accepts!(INT8);
}

impl ToSql for Flake {
    fn to_sql(
        &self,
        _: &PgType,
        buf: &mut BytesMut
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        buf.put_i64(i64::from(*self));

        Ok(IsNull::No)
    }

    accepts!(INT8);

    to_sql_checked!();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn int8_both_ways() {
        let flake = Flake::from_parts(12345, 7, 3).unwrap();
        let mut buf = BytesMut::new();

        let is_null = flake.to_sql(&PgType::INT8, &mut buf)
            .expect("failed to write flake");

        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], &flake.id().to_be_bytes());

        let parsed = Flake::from_sql(&PgType::INT8, &buf)
            .expect("failed to read flake");

        assert_eq!(parsed, flake);
    }

    #[test]
    fn rejects_bad_buffers() {
        assert!(Flake::from_sql(&PgType::INT8, &[0u8; 4]).is_err());
        assert!(Flake::from_sql(&PgType::INT8, &(-1i64).to_be_bytes()).is_err());
    }
}
